//! Reset code email.

use crate::backend::mail::OutgoingEmail;

pub const RESET_SUBJECT: &str = "Your Password Reset Code";

/// Build the email carrying a reset code
pub fn reset_code_email(to: &str, username: &str, code: &str) -> OutgoingEmail {
    let html = format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif; color: #222;">
    <p>Hello {username},</p>
    <p>Use the code below to reset your password. It expires in 15 minutes.</p>
    <p style="font-size: 28px; letter-spacing: 6px; font-weight: bold;">{code}</p>
    <p>If you did not ask for a reset, you can ignore this email.</p>
  </body>
</html>"#,
        username = escape_html(username),
        code = escape_html(code),
    );

    OutgoingEmail {
        to: to.to_string(),
        subject: RESET_SUBJECT.to_string(),
        text: format!("Your password reset code is: {code}"),
        html: Some(html),
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
