//! Standard input capture.
//!
//! Content is only read when stdin is *not* interactive. A terminal, or a
//! character device such as `/dev/null`, means nothing was piped in and the
//! run fails with a usage error instead of blocking on a read.

use crate::content::Content;
use std::io::{self, IsTerminal, Read};

pub trait InputSource {
    /// True when there is no piped content to read.
    fn is_interactive(&self) -> bool;

    /// Read everything until end of input.
    fn read_all(&mut self) -> io::Result<Content>;
}

/// The process's standard input.
#[derive(Debug, Default)]
pub struct StdinSource;

#[cfg(unix)]
fn is_char_device(stdin: &io::Stdin) -> bool {
    use std::fs::File;
    use std::os::fd::AsFd;
    use std::os::unix::fs::FileTypeExt;

    match stdin.as_fd().try_clone_to_owned() {
        Ok(fd) => File::from(fd)
            .metadata()
            .map(|meta| meta.file_type().is_char_device())
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_char_device(_stdin: &io::Stdin) -> bool {
    false
}

impl InputSource for StdinSource {
    fn is_interactive(&self) -> bool {
        let stdin = io::stdin();
        stdin.is_terminal() || is_char_device(&stdin)
    }

    fn read_all(&mut self) -> io::Result<Content> {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        Ok(Content::new(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::BytesSource;

    #[test]
    fn piped_bytes_are_read_verbatim() {
        let mut source = BytesSource::piped(b"line one\n\x00binary\n");
        assert!(!source.is_interactive());
        let content = source.read_all().unwrap();
        assert_eq!(content.as_bytes(), b"line one\n\x00binary\n");
    }

    #[test]
    fn empty_pipe_is_still_input() {
        let mut source = BytesSource::piped(b"");
        assert!(!source.is_interactive());
        assert!(source.read_all().unwrap().is_empty());
    }
}
