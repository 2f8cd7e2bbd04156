// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Yes/no confirmation on the terminal.

use std::io::{self, BufRead, Write};

/// Writes `question` and reads one line. Only `y` or `yes` confirm; end of
/// input declines.
pub fn confirm<R, W>(question: &str, mut input: R, mut output: W) -> io::Result<bool>
where
	R: BufRead,
	W: Write,
{
	write!(output, "{question}\nContinue? [y/N] ")?;
	output.flush()?;

	let mut answer = String::new();
	input.read_line(&mut answer)?;
	Ok(matches!(
		answer.trim().to_ascii_lowercase().as_str(),
		"y" | "yes"
	))
}
