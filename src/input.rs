use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Where command lines come from.
pub trait LineSource {
    /// Returns the next line with its terminator, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Called once before the first read.
    fn on_start(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Shows the answer to a non-mutating command, such as a query, to whoever is typing.
    fn answer(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    /// Called once after end of input.
    fn on_finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads lines from a file or any other buffered reader, with no prompting.
pub struct PlainSource<R> {
    reader: R,
}

impl<R: BufRead> PlainSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for PlainSource<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        read_line(&mut self.reader)
    }
}

/// Reads lines typed by a user, printing a `> ` prompt before each one.
pub struct InteractiveSource<R, W> {
    reader: R,
    console: W,
}

impl<R: BufRead, W: Write> InteractiveSource<R, W> {
    pub fn new(reader: R, console: W) -> Self {
        Self { reader, console }
    }
}

impl<R: BufRead, W: Write> LineSource for InteractiveSource<R, W> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.console.write_all(b"> ")?;
        self.console.flush()?;
        read_line(&mut self.reader)
    }

    fn answer(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.console, "{}", text)?;
        self.console.flush()
    }

    fn on_start(&mut self) -> io::Result<()> {
        writeln!(self.console, "Press Ctrl + D to exit")?;
        self.console.flush()
    }

    // The prompt is still on screen at EOF; move off it so the report starts on a clean line.
    fn on_finish(&mut self) -> io::Result<()> {
        writeln!(self.console)?;
        self.console.flush()
    }
}

/// Picks the input strategy once at startup: the named file, or stdin with a prompt.
pub fn open_source(path: Option<&Path>) -> anyhow::Result<Box<dyn LineSource>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Invalid input file specified: {}", path.display()))?;
            Ok(Box::new(PlainSource::new(BufReader::new(file))))
        }
        None => Ok(Box::new(InteractiveSource::new(
            io::stdin().lock(),
            io::stdout(),
        ))),
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(source: &mut dyn LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_plain_source_keeps_terminators() {
        let mut source = PlainSource::new(Cursor::new("buy AAPL 5\r\nsell AAPL 1\nquery AAPL"));
        assert_eq!(drain(&mut source), vec!["buy AAPL 5\r\n", "sell AAPL 1\n", "query AAPL"]);
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn test_interactive_source_prompts() {
        let mut console = Vec::new();
        {
            let mut source = InteractiveSource::new(Cursor::new("buy AAPL 5\n"), &mut console);
            source.on_start().unwrap();
            assert_eq!(drain(&mut source), vec!["buy AAPL 5\n"]);
            source.on_finish().unwrap();
        }
        assert_eq!(
            String::from_utf8(console).unwrap(),
            "Press Ctrl + D to exit\n> > \n"
        );
    }

    #[test]
    fn test_only_interactive_source_shows_answers() {
        let mut console = Vec::new();
        InteractiveSource::new(Cursor::new(""), &mut console)
            .answer("AAPL 10.0 is at or below threshold 12.5")
            .unwrap();
        assert_eq!(
            String::from_utf8(console).unwrap(),
            "AAPL 10.0 is at or below threshold 12.5\n"
        );

        let mut plain = PlainSource::new(Cursor::new(""));
        assert!(plain.answer("ignored").is_ok());
    }

    #[test]
    fn test_missing_input_file_is_fatal() {
        let result = open_source(Some(Path::new("no/such/commands.txt")));
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("Invalid input file specified"));
    }
}
