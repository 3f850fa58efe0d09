//! Main Program for Linescramble
//! Run with `--help` for more instruction

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Error;
use clap::{Parser, ValueEnum};
use image::io::Reader as ImageReader;
use image::save_buffer;
use log::info;
use ndarray::prelude::*;

use linescramble::{scramble_rows, unscramble_rows, Key, Permutation};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Reorder rows with the key's permutation
    Scramble,
    /// Undo a scramble made with the same key
    Unscramble,
}

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Input file
    input: PathBuf,

    /// Scramble key (only the low 15 bits are used)
    #[arg(allow_negative_numbers = true)]
    key: i64,

    /// Operation mode
    #[arg(value_enum, ignore_case = true)]
    mode: Mode,

    /// Output file
    #[arg(short = 'o', long, default_value = "out.png")]
    output: PathBuf,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let im = ImageReader::new(BufReader::new(File::open(&args.input)?))
        .with_guessed_format()?
        .decode()?;

    let height = im.height() as usize;
    let width = im.width() as usize;
    info!("input is {}x{} pixels", im.width(), im.height());

    let perm = Permutation::generate(height, Key::new(args.key))?;

    let arr = <ArrayView3<u8>>::from_shape(
        (height, width, im.color().bytes_per_pixel() as usize),
        im.as_bytes(),
    )?;

    let out = match args.mode {
        Mode::Scramble => scramble_rows(arr, &perm)?,
        Mode::Unscramble => unscramble_rows(arr, &perm)?,
    };

    save_buffer(
        &args.output,
        out.as_slice().expect("Should be standard-layout"),
        im.width(),
        im.height(),
        im.color(),
    )?;
    info!("wrote {}", args.output.display());

    Ok(())
}
