//! `sy parse` — dry-run the instruction parser.

use std::io::Write;
use clap::Args;
use serde::Serialize;
use stitchy_core::parse::{Recognition, recognize};
use stitchy_core::transform::to_abbreviations;

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Crochet instruction to analyze.
    pub instruction: String,

    /// Stitch count of the previous round.
    #[arg(long, default_value_t = 0)]
    pub previous: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseOutput {
    instruction: String,
    previous: u32,
    stitch_count: u32,
    recognized: bool,
    rule: String,
}

pub fn run_parse(args: &ParseArgs, output: OutputMode) -> anyhow::Result<()> {
    let instruction = to_abbreviations(args.instruction.trim());
    let (recognition, stitch_count) = recognize(&instruction, args.previous);

    let result = ParseOutput {
        instruction,
        previous: args.previous,
        stitch_count,
        recognized: recognition != Recognition::Unrecognized,
        rule: recognition.describe().to_string(),
    };
    render(output, &result, |r, w| {
        writeln!(w, "{} -> {} sts", r.instruction, r.stitch_count)?;
        writeln!(w, "  {}", r.rule)
    })
}
