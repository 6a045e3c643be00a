use crate::accent::ReplacementTable;
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Filter stdin to stdout, one accentuated line per input line.
pub async fn run_once(table: &ReplacementTable) -> std::io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    filter_lines(table, stdin, &mut stdout).await
}

pub async fn filter_lines<R, W>(
    table: &ReplacementTable,
    reader: R,
    writer: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        debug!("raw: {line}");
        let text = table.accentuate(&line);
        writer.write_all(text.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await
}
