//! Prompt command - render the system prompt

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output::print_raw;
use anyhow::Result;
use mechafil_core::template::render_prompt;

pub fn run(args: &GlobalArgs, write_back: bool) -> Result<()> {
    let ctx = Context::new(args)?;
    let write_back = write_back && ctx.config.prompt.write_back;
    let rendered = render_prompt(&ctx.config.prompt.template, write_back)?;
    print_raw(&rendered)?;
    Ok(())
}
