use std::{fmt::Display, io::Write};

/// Line-oriented writer for TSPLIB-style `KEY: value` files.
pub(crate) struct KeywordWriter<W: Write>(W);

impl<W: Write> KeywordWriter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self(out)
    }

    pub(crate) fn into_inner(self) -> W {
        self.0
    }

    pub(crate) fn line<T: Display>(&mut self, value: T) -> std::io::Result<()> {
        writeln!(self.0, "{value}")
    }

    pub(crate) fn kv_colon<T: Display>(&mut self, key: &str, value: T) -> std::io::Result<()> {
        writeln!(self.0, "{key}: {value}")
    }

    pub(crate) fn opt_kv_colon<T: Display>(
        &mut self,
        key: &str,
        value: Option<T>,
    ) -> std::io::Result<()> {
        if let Some(value) = value {
            self.kv_colon(key, value)?;
        }
        Ok(())
    }

    /// Writes `values` space separated on one line. Returns how many were written.
    pub(crate) fn row<T: Display>(
        &mut self,
        values: impl IntoIterator<Item = T>,
    ) -> std::io::Result<usize> {
        let mut count = 0;
        for value in values {
            if count == 0 {
                write!(self.0, "{value}")?;
            } else {
                write!(self.0, " {value}")?;
            }
            count += 1;
        }
        writeln!(self.0)?;
        Ok(count)
    }

    /// Writes `values` with at most `per_line` entries on each line.
    pub(crate) fn wrapped<T: Display>(
        &mut self,
        values: &[T],
        per_line: usize,
    ) -> std::io::Result<()> {
        for chunk in values.chunks(per_line.max(1)) {
            self.row(chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::KeywordWriter;

    fn render(f: impl FnOnce(&mut KeywordWriter<Vec<u8>>) -> std::io::Result<()>) -> String {
        let mut writer = KeywordWriter::new(Vec::new());
        f(&mut writer).expect("write to vec");
        String::from_utf8(writer.into_inner()).expect("utf8 output")
    }

    #[test]
    fn kv_colon_and_optional_values() {
        let text = render(|w| {
            w.kv_colon("NAME", "SORT")?;
            w.opt_kv_colon::<usize>("DIMENSION", None)?;
            w.opt_kv_colon("DIMENSION", Some(4))
        });
        assert_eq!(text, "NAME: SORT\nDIMENSION: 4\n");
    }

    #[test]
    fn row_separates_values_with_single_spaces() {
        let mut count = 0;
        let text = render(|w| {
            count = w.row([1, 2, 3])?;
            Ok(())
        });
        assert_eq!(text, "1 2 3\n");
        assert_eq!(count, 3);
    }

    #[test]
    fn wrapped_splits_long_rows() {
        let text = render(|w| w.wrapped(&[0, 1, 2, 3, 4], 2));
        assert_eq!(text, "0 1\n2 3\n4\n");
    }
}
