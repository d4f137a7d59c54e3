//! Token masking for logs.

/// Masks a secret for logging: tokens of 11 chars or fewer become `***`,
/// longer ones keep the first 7 and last 4 chars (`1234567***wxyz`).
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
