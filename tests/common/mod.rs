//! Small deterministic environments shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use qlearn::{
    Result,
    ports::{Environment, EpisodeSummary, Observer},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
}

/// Positions `0..=goal`; the episode starts at 0 and ends on reaching `goal`.
///
/// Every step costs -1 except the step onto the goal, which pays +10.
#[derive(Debug)]
pub struct Corridor {
    goal: usize,
    position: usize,
}

impl Corridor {
    pub fn new(goal: usize) -> Self {
        Self { goal, position: 0 }
    }

    /// Return collected by walking straight to the goal
    pub fn optimal_return(&self) -> f64 {
        -((self.goal - 1) as f64) + 10.0
    }
}

impl Environment for Corridor {
    type State = usize;
    type Action = Move;

    fn reset(&mut self) -> Result<usize> {
        self.position = 0;
        Ok(self.position)
    }

    fn legal_actions(&self, state: &usize) -> Vec<Move> {
        if *state == self.goal {
            Vec::new()
        } else {
            vec![Move::Left, Move::Right]
        }
    }

    fn step(&mut self, action: &Move) -> Result<(usize, f64)> {
        self.position = match action {
            Move::Left => self.position.saturating_sub(1),
            Move::Right => self.position + 1,
        };
        let reward = if self.position == self.goal { 10.0 } else { -1.0 };
        Ok((self.position, reward))
    }
}

/// One decision between two arms, then the episode ends.
#[derive(Debug, Default)]
pub struct TwoArmedBandit;

impl Environment for TwoArmedBandit {
    type State = &'static str;
    type Action = char;

    fn reset(&mut self) -> Result<&'static str> {
        Ok("start")
    }

    fn legal_actions(&self, state: &&'static str) -> Vec<char> {
        if *state == "start" {
            vec!['A', 'B']
        } else {
            Vec::new()
        }
    }

    fn step(&mut self, action: &char) -> Result<(&'static str, f64)> {
        let reward = if *action == 'A' { 1.0 } else { 0.0 };
        Ok(("end", reward))
    }
}

/// Environment whose initial state is already terminal.
#[derive(Debug, Default)]
pub struct AlreadyOver;

impl Environment for AlreadyOver {
    type State = u8;
    type Action = u8;

    fn reset(&mut self) -> Result<u8> {
        Ok(0)
    }

    fn legal_actions(&self, _state: &u8) -> Vec<u8> {
        Vec::new()
    }

    fn step(&mut self, _action: &u8) -> Result<(u8, f64)> {
        Err(qlearn::Error::Environment {
            message: "no moves in a finished episode".to_string(),
        })
    }
}

/// Observer that shares what it records with the test body.
#[derive(Debug, Clone, Default)]
pub struct SharedRecorder {
    pub episodes: Arc<Mutex<Vec<EpisodeSummary>>>,
    pub steps: Arc<Mutex<usize>>,
}

impl Observer for SharedRecorder {
    fn on_step(&mut self, _episode: usize, _step: usize, _reward: f64) -> Result<()> {
        *self.steps.lock().unwrap() += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.episodes.lock().unwrap().push(*summary);
        Ok(())
    }
}
