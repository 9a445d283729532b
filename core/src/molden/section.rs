use std::io::{self, BufRead, BufReader};

use flate2::bufread::MultiGzDecoder;

/// Marker line opening the Molden block embedded in a Q-Chem log.
pub const MOLDEN_START: &str = "======= MOLDEN-FORMATTED INPUT FILE FOLLOWS =======";
/// Marker line closing the embedded Molden block.
pub const MOLDEN_END: &str = "======= END OF MOLDEN-FORMATTED INPUT FILE =======";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Wraps `reader` in a gzip decoder if its content starts with the gzip
/// magic bytes, so compressed and plain logs read the same. Concatenated
/// gzip members are decoded as one stream.
pub fn decompressed<'a, R: BufRead + 'a>(mut reader: R) -> io::Result<Box<dyn BufRead + 'a>> {
    if reader.fill_buf()?.starts_with(&GZIP_MAGIC) {
        log::debug!("input is gzip compressed");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Lines of a byte stream, split on `\n` with a trailing `\r` removed.
/// Invalid UTF-8 is replaced rather than reported.
pub struct RawLines<R> {
    reader: R,
    buffer: Vec<u8>,
}

pub fn raw_lines<R: BufRead>(reader: R) -> RawLines<R> {
    RawLines {
        reader,
        buffer: Vec::new(),
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();

        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                }
                if self.buffer.last() == Some(&b'\r') {
                    self.buffer.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Position {
    Before,
    Inside,
    Done,
}

/// Yields the lines strictly between [`MOLDEN_START`] and [`MOLDEN_END`].
///
/// Without a start marker nothing is yielded; without an end marker the
/// section runs to the end of the stream. Single pass, nothing is buffered.
pub struct MoldenSection<I> {
    lines: I,
    position: Position,
}

impl<I> MoldenSection<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            position: Position::Before,
        }
    }
}

/// Extracts the embedded Molden block from a calculation log.
pub fn molden_section<R: BufRead>(reader: R) -> MoldenSection<RawLines<R>> {
    MoldenSection::new(raw_lines(reader))
}

impl<I> Iterator for MoldenSection<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.position == Position::Done {
                return None;
            }

            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(error)) => return Some(Err(error)),
                None => {
                    if self.position == Position::Before {
                        log::warn!("no Molden block found in log");
                    }
                    self.position = Position::Done;
                    return None;
                }
            };

            match self.position {
                Position::Before if line.trim() == MOLDEN_START => {
                    log::debug!("entering Molden block");
                    self.position = Position::Inside;
                }
                Position::Before => {}
                Position::Inside if line.trim() == MOLDEN_END => {
                    log::debug!("leaving Molden block");
                    self.position = Position::Done;
                }
                Position::Inside => return Some(Ok(line)),
                Position::Done => unreachable!(),
            }
        }
    }
}

impl<I> std::iter::FusedIterator for MoldenSection<I> where I: Iterator<Item = io::Result<String>> {}
