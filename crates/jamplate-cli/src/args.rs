//! Invocation parsing.
//!
//! Grammar: `<input> [<key>=<value> ...] [-o <output>]`. The first non-empty
//! token is the input; every token after it is an option. Empty tokens are
//! placeholders and are skipped wherever they appear.

use jamplate_core::Memory;
use thiserror::Error;

/// Errors that make an argument list unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No non-empty token was found for the input path.
    #[error("no input specified")]
    NoInput,

    /// A token after the input is neither `key=value` nor `-o`.
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// One parsed command-line run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    input: String,
    output: String,
    default_memory: Memory,
}

impl Invocation {
    /// Output path used when `-o` is not given.
    pub const DEFAULT_OUTPUT: &'static str = "output";

    /// Memory delimiter between key and value.
    const DELIMITER: char = '=';

    /// Output option flag.
    const OUTPUT_FLAG: &'static str = "-o";

    /// Create an invocation for `input` with default output and empty memory.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: Self::DEFAULT_OUTPUT.to_string(),
            default_memory: Memory::new(),
        }
    }

    /// Replace the output path.
    #[cfg(test)]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Parse an invocation from raw argument tokens.
    ///
    /// # Errors
    /// Returns [`ArgumentError::NoInput`] if every token is empty and
    /// [`ArgumentError::UnknownOption`] for the first unrecognized option.
    pub fn parse<I, S>(tokens: I) -> Result<Self, ArgumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = tokens.into_iter().filter(|t| !t.as_ref().is_empty());

        let input = tokens.next().ok_or(ArgumentError::NoInput)?;
        let mut invocation = Self::new(input.as_ref());

        while let Some(token) = tokens.next() {
            let token = token.as_ref();

            if let Some((key, value)) = token.split_once(Self::DELIMITER) {
                invocation
                    .default_memory
                    .insert(key.to_string(), value.to_string());
                continue;
            }

            if token == Self::OUTPUT_FLAG {
                // A trailing `-o` leaves the output unchanged.
                if let Some(output) = tokens.next() {
                    invocation.output = output.as_ref().to_string();
                }
                continue;
            }

            return Err(ArgumentError::UnknownOption(token.to_string()));
        }

        Ok(invocation)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn default_memory(&self) -> &Memory {
        &self.default_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(pairs: &[(&str, &str)]) -> Memory {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_input_only() {
        let invocation = Invocation::parse(["a"]).unwrap();
        assert_eq!(invocation.input(), "a");
        assert_eq!(invocation.output(), "output");
        assert!(invocation.default_memory().is_empty());
    }

    #[test]
    fn test_output_flag() {
        let invocation = Invocation::parse(["a", "-o", "b"]).unwrap();
        assert_eq!(invocation.output(), "b");
    }

    #[test]
    fn test_output_flag_skips_placeholders() {
        let invocation = Invocation::parse(["a", "-o", "", "", "b"]).unwrap();
        assert_eq!(invocation.output(), "b");
    }

    #[test]
    fn test_trailing_output_flag_keeps_default() {
        let invocation = Invocation::parse(["a", "-o"]).unwrap();
        assert_eq!(invocation.output(), Invocation::DEFAULT_OUTPUT);

        let invocation = Invocation::parse(["a", "-o", "b", "-o", ""]).unwrap();
        assert_eq!(invocation.output(), "b");
    }

    #[test]
    fn test_memory_entries() {
        let invocation = Invocation::parse(["a", "K=V"]).unwrap();
        assert_eq!(invocation.default_memory(), &memory(&[("K", "V")]));
    }

    #[test]
    fn test_memory_last_write_wins() {
        let invocation = Invocation::parse(["a", "K=V", "K=W"]).unwrap();
        assert_eq!(invocation.default_memory(), &memory(&[("K", "W")]));
    }

    #[test]
    fn test_memory_empty_value_and_first_delimiter() {
        let invocation = Invocation::parse(["a", "K=", "url=a=b", "=x"]).unwrap();
        assert_eq!(
            invocation.default_memory(),
            &memory(&[("K", ""), ("url", "a=b"), ("", "x")])
        );
    }

    #[test]
    fn test_memory_and_output_interleaved() {
        let invocation = Invocation::parse(["site", "A=1", "-o", "dist", "B=2"]).unwrap();
        assert_eq!(invocation.input(), "site");
        assert_eq!(invocation.output(), "dist");
        assert_eq!(invocation.default_memory(), &memory(&[("A", "1"), ("B", "2")]));
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            Invocation::parse(["a", "-x"]),
            Err(ArgumentError::UnknownOption("-x".to_string()))
        );
        assert_eq!(
            Invocation::parse(["a", "K=V", "stray", "-o", "b"]),
            Err(ArgumentError::UnknownOption("stray".to_string()))
        );
    }

    #[test]
    fn test_no_input() {
        assert_eq!(
            Invocation::parse(Vec::<String>::new()),
            Err(ArgumentError::NoInput)
        );
        assert_eq!(Invocation::parse(["", ""]), Err(ArgumentError::NoInput));
    }

    #[test]
    fn test_leading_placeholders_are_skipped() {
        let invocation = Invocation::parse(["", "a", "", "K=V"]).unwrap();
        assert_eq!(invocation.input(), "a");
        assert_eq!(invocation.default_memory(), &memory(&[("K", "V")]));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ArgumentError::NoInput.to_string(), "no input specified");
        assert_eq!(
            ArgumentError::UnknownOption("-x".to_string()).to_string(),
            "unknown option: -x"
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let tokens = ["a", "K=V", "-o", "b", "L=W"];
        assert_eq!(Invocation::parse(tokens), Invocation::parse(tokens));
    }

    #[test]
    fn test_builders() {
        let invocation = Invocation::new("in").with_output("out");
        assert_eq!(invocation, Invocation::parse(["in", "-o", "out"]).unwrap());
    }
}
