//! Newline-delimited JSON-RPC over a byte stream pair.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use foundry_mcp::Dispatcher;

/// Serve requests from stdin, one per line, writing envelopes to stdout.
///
/// # Errors
///
/// Returns the first I/O error on either stream.
pub async fn run(dispatcher: &Dispatcher) -> std::io::Result<()> {
    serve(dispatcher, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Read lines until EOF, answering each one in turn.
///
/// Lines are handed over as raw bytes, so one that is not UTF-8 gets a parse
/// error envelope like any other undecodable line. Blank lines and
/// notifications produce no output.
///
/// # Errors
///
/// Returns the first I/O error on either stream.
pub async fn serve<R, W>(
    dispatcher: &Dispatcher,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let Some(response) = dispatcher.handle_bytes(line).await else {
            continue;
        };

        let mut frame = serde_json::to_vec(&response)?;
        frame.push(b'\n');
        writer.write_all(&frame).await?;
        writer.flush().await?;
    }

    tracing::info!("stdin closed, stopping");
    Ok(())
}
