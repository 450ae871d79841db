//! Interactive request/response loop between a person and the agent.

use crate::agent::{AgentError, ChatAgent};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

pub const EXIT_KEYWORDS: [&str; 3] = ["exit", "quit", "bye"];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ExitKeyword,
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub turns: usize,
    pub ended_by: SessionEnd,
}

enum LoopControl {
    Continue,
    Exit,
}

pub fn is_exit_command(input: &str) -> bool {
    EXIT_KEYWORDS
        .iter()
        .any(|keyword| input.eq_ignore_ascii_case(keyword))
}

/// Read lines until an exit keyword or end of input, answering each through
/// the agent. Agent failures end the session.
pub async fn run_session<A, R, W>(
    agent: &mut A,
    input: R,
    output: &mut W,
) -> Result<SessionSummary, SessionError>
where
    A: ChatAgent + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut turns = 0usize;

    write_line(output, "\n💬 Interactive Agent Ready!").await?;
    write_line(output, "Try asking: 'What's the weather or time in a <city>?'").await?;
    write_line(output, "Type 'exit', 'quit', or 'bye' to end.\n").await?;

    let ended_by = loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            write_line(output, "").await?;
            info!(turns, "Input closed, ending session");
            break SessionEnd::InputClosed;
        };

        match handle_line(agent, &line, output).await? {
            (LoopControl::Continue, answered) => turns += usize::from(answered),
            (LoopControl::Exit, _) => break SessionEnd::ExitKeyword,
        }
    };

    output.flush().await?;
    Ok(SessionSummary { turns, ended_by })
}

async fn handle_line<A, W>(
    agent: &mut A,
    line: &str,
    output: &mut W,
) -> Result<(LoopControl, bool), SessionError>
where
    A: ChatAgent + ?Sized,
    W: AsyncWrite + Unpin,
{
    if is_exit_command(line) {
        write_line(output, "👋 Goodbye!").await?;
        return Ok((LoopControl::Exit, false));
    }
    if line.trim().is_empty() {
        return Ok((LoopControl::Continue, false));
    }

    debug!(chars = line.len(), "Forwarding prompt to agent");
    write_line(output, "\n🤔 Thinking...\n").await?;
    let response = agent.respond(line).await?;
    write_line(output, &response).await?;
    write_line(output, "\n").await?;
    Ok((LoopControl::Continue, true))
}

async fn write_line<W>(output: &mut W, text: &str) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
