//! Overwrite confirmation for an existing output file.

use std::io::{BufRead, Write};
use std::path::Path;

/// Ask whether `path` may be overwritten. Only `y` (any case) confirms.
pub(crate) fn confirm_overwrite<R: BufRead, W: Write>(path: &Path, input: &mut R, output: &mut W) -> std::io::Result<bool> {
    write!(output, "Overwrite {} (y/n) ", path.display())?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = confirm_overwrite(Path::new("stocks.xlsx"), &mut answer.as_bytes(), &mut output).unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_text() {
        assert_eq!(ask("y\n").1, "Overwrite stocks.xlsx (y/n) ");
    }

    #[test]
    fn test_only_y_confirms() {
        assert!(ask("y\n").0);
        assert!(ask(" Y \n").0);
        assert!(!ask("yes\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("").0);
    }
}
