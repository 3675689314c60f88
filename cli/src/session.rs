//! Drives a `PostForm` from line-oriented input.

use anyhow::{Context, Result};
use post_core::{PostForm, Transport};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::render::{render, BODY_PROMPT, TITLE_PROMPT};

/// Fill the draft, submit once, and write the rendered form.
///
/// Returns whether the submission succeeded.
pub async fn run_once<T, W>(
    form: &mut PostForm,
    transport: &T,
    title: &str,
    body: &str,
    out: &mut W,
) -> Result<bool>
where
    T: Transport + ?Sized,
    W: AsyncWrite + Unpin,
{
    form.set_title(title);
    form.set_body(body);
    let ok = submit_rendered(form, transport, out).await?;
    out.flush().await?;
    Ok(ok)
}

/// Prompt for a title line and a body line, submit, render; repeat until
/// input runs out. Failed submissions are shown, not returned.
pub async fn run_interactive<T, R, W>(
    form: &mut PostForm,
    transport: &T,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    T: Transport + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(render(form).as_bytes()).await?;

    loop {
        out.write_all(TITLE_PROMPT.as_bytes()).await?;
        out.flush().await?;
        let Some(title) = read_line(&mut input).await.context("reading title")? else {
            break;
        };

        out.write_all(BODY_PROMPT.as_bytes()).await?;
        out.flush().await?;
        let Some(body) = read_line(&mut input).await.context("reading body")? else {
            break;
        };

        form.set_title(title);
        form.set_body(body);
        submit_rendered(form, transport, out).await?;
    }

    out.flush().await?;
    Ok(())
}

/// Submit, rendering the `Loading` form before the request goes out and the
/// outcome once it is back.
async fn submit_rendered<T, W>(form: &mut PostForm, transport: &T, out: &mut W) -> Result<bool>
where
    T: Transport + ?Sized,
    W: AsyncWrite + Unpin,
{
    let ok = match form.start() {
        Ok((in_flight, request)) => {
            out.write_all(render(in_flight.form()).as_bytes()).await?;
            out.flush().await?;
            let result = transport.execute(request).await;
            in_flight.complete(result).is_ok()
        }
        Err(err) => {
            debug!(error = %err, "submission rejected");
            false
        }
    };
    out.write_all(render(form).as_bytes()).await?;
    Ok(ok)
}

/// One line without its terminator, `None` at EOF. Invalid UTF-8 is
/// replaced rather than failing the session.
async fn read_line<R>(input: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
