use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static CPF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}$").expect("valid CPF pattern"));

const CPF_DIGITS: usize = 11;
const CPF_MIN_LEN: usize = 11;
const CPF_MAX_LEN: usize = 14;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpfError {
    #[error("CPF inválido. Use o formato 000.000.000-00")]
    Malformed,
}

/// A Brazilian taxpayer id, always stored as `NNN.NNN.NNN-NN`.
///
/// Only the shape is checked; check digits are not verified.
#[derive(Clone, PartialEq, Eq)]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(raw: &str) -> Result<Self, CpfError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if !(CPF_MIN_LEN..=CPF_MAX_LEN).contains(&len) || !CPF_PATTERN.is_match(trimmed) {
            return Err(CpfError::Malformed);
        }

        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        Ok(Self(Self::mask_input(&digits)))
    }

    /// Formats free-form input the way the form field displays it while typing.
    ///
    /// Non-digits are dropped, input is capped at eleven digits and the
    /// punctuation appears as soon as the next group starts.
    pub fn mask_input(raw: &str) -> String {
        let digits: Vec<char> = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(CPF_DIGITS)
            .collect();

        let mut masked = String::with_capacity(CPF_MAX_LEN);
        for (index, digit) in digits.iter().enumerate() {
            match index {
                3 | 6 => masked.push('.'),
                9 => masked.push('-'),
                _ => {}
            }
            masked.push(*digit);
        }
        masked
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

// Only the check digits are shown.
impl fmt::Debug for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tail = self.0.get(12..).unwrap_or_default();
        write!(f, "Cpf(***.***.***-{tail})")
    }
}
