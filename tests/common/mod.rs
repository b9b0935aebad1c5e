//! Test doubles shared by the keypad, entry and controller tests

#![allow(dead_code)]

use std::collections::VecDeque;

use cricket_call::display::Display;
use cricket_call::{KeySource, RawKey};

/// Key source replaying a fixed script.
///
/// Script characters: `0`-`9` digits, `#` terminator, `A`-`E` keys 11..15.
pub struct ScriptedKeys {
    keys: VecDeque<RawKey>,
}

impl ScriptedKeys {
    pub fn new(script: &str) -> Self {
        Self {
            keys: script.chars().map(key).collect(),
        }
    }

    pub fn push_script(&mut self, script: &str) {
        self.keys.extend(script.chars().map(key));
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn wait_key(&mut self) -> RawKey {
        self.keys.pop_front().expect("key script exhausted")
    }
}

pub fn key(c: char) -> RawKey {
    let value = match c {
        '0'..='9' => c as u8 - b'0',
        '#' => RawKey::TERMINATOR.value(),
        'A'..='E' => c as u8 - b'A' + 11,
        _ => panic!("no key for {:?}", c),
    };
    RawKey::new(value).unwrap()
}

/// Display recording every call.
#[derive(Default)]
pub struct RecordingDisplay {
    pub writes: Vec<(u8, u8, String)>,
    pub clears: usize,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.writes.iter().map(|(_, _, t)| t.as_str()).collect()
    }

    pub fn shows(&self, text: &str) -> bool {
        self.writes.iter().any(|(_, _, t)| t == text)
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn write_at(&mut self, col: u8, row: u8, text: &str) {
        self.writes.push((col, row, text.to_string()));
    }
}
