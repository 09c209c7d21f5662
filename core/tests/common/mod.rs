#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};

/// Scripted non-blocking transport: hands out one queued chunk per read,
/// then reports "would block".
pub struct ScriptedSource {
    steps: VecDeque<io::Result<Vec<u8>>>,
    pub reads: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            reads: 0,
        }
    }

    pub fn chunk(mut self, bytes: &[u8]) -> Self {
        self.steps.push_back(Ok(bytes.to_vec()));
        self
    }

    pub fn report(self, modifiers: u8, keys: [u8; 6]) -> Self {
        self.chunk(&report_bytes(modifiers, keys))
    }

    pub fn error(mut self, kind: ErrorKind) -> Self {
        self.steps.push_back(Err(io::Error::from(kind)));
        self
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        match self.steps.pop_front() {
            None => Err(io::Error::from(ErrorKind::WouldBlock)),
            Some(Err(e)) => Err(e),
            Some(Ok(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
        }
    }
}

pub fn report_bytes(modifiers: u8, keys: [u8; 6]) -> [u8; 8] {
    [
        modifiers, 0, keys[0], keys[1], keys[2], keys[3], keys[4], keys[5],
    ]
}

/// A width x height frame whose cells encode their own coordinates.
pub fn coordinate_frame(width: u32, height: u32) -> Vec<u32> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (y << 16) | x))
        .collect()
}
