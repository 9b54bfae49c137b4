use crate::{ContactSubmission, Error};

const WHATSAPP_BASE: &str = "https://wa.me";

/// Builds a WhatsApp deep link with the submission pre-filled as the chat text.
///
/// Everything but digits is stripped from `number`, so `+92 (349) 553-8902`
/// and `923495538902` produce the same link.
pub fn fallback_link(submission: &ContactSubmission, number: &str) -> crate::Result<String> {
    let digits = fallback_digits(number)?;
    let text = format!(
        "Hello,\n\nName: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}",
        submission.name, submission.email, submission.subject, submission.message
    );

    Ok(format!(
        "{WHATSAPP_BASE}/{digits}?text={}",
        urlencoding::encode(&text)
    ))
}

/// Returns the digits of a chat number, failing when there are none.
pub fn fallback_digits(number: &str) -> crate::Result<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(Error::InvalidFallbackNumber(number.to_owned()));
    }

    Ok(digits)
}
