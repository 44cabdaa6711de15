// MIT LICENSE
//
// Copyright (c) 2021 Dash Core Group
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Human-friendly drawing of Merkle trees and digests.

use std::io::{Result, Write};

use itertools::Itertools;

static HEX_LEN: usize = 8;
static INDENT_SPACES: usize = 4;

/// Pretty visualization of Merkle tree components.
pub trait Visualize {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>>;
}

/// Writer that indents every new line by the current depth.
pub struct Drawer<W: Write> {
    level: usize,
    write: W,
}

impl<W: Write> Drawer<W> {
    pub fn new(write: W) -> Self {
        Drawer { level: 0, write }
    }

    pub fn down(&mut self) {
        self.level += 1;
    }

    pub fn up(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Writes `buf`, indenting every line after a `\n` by the current depth.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let newline = format!("\n{}", " ".repeat(INDENT_SPACES * self.level));
        for chunk in Itertools::intersperse(buf.split(|c| *c == b'\n'), newline.as_bytes()) {
            self.write.write_all(chunk)?;
        }
        Ok(())
    }

    /// Terminate the drawing with a newline and flush the inner writer.
    pub fn flush(&mut self) -> Result<()> {
        self.write.write_all(b"\n")?;
        self.write.flush()?;
        Ok(())
    }
}

/// Shortened hex: first and last 8 hex characters for long inputs.
pub fn to_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    let remaining = encoded.len().saturating_sub(HEX_LEN);
    if remaining >= 8 {
        format!("{}..{}", &encoded[0..HEX_LEN], &encoded[remaining..])
    } else {
        encoded
    }
}

impl Visualize for [u8] {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("[hex: {}]", to_hex(self)).as_bytes())?;
        Ok(drawer)
    }
}

impl<const N: usize> Visualize for [u8; N] {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        self.as_slice().visualize(drawer)
    }
}

/// Draw `value` into `v` without the trailing newline `flush` adds.
pub fn visualize_to_vec<T: Visualize + ?Sized>(v: &mut Vec<u8>, value: &T) -> Result<()> {
    value.visualize(Drawer::new(v)).map(drop)
}
