/// Collapses every run of whitespace, line breaks included, into a single
/// space and trims the ends.
///
/// Card text copied from markup carries the source's indentation and line
/// breaks; this turns it back into a single readable line.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Body of the toast confirming a contact form submission.
pub fn contact_confirmation(name: &str, email: &str) -> String {
    format!(
        "Thank you, {name}! We've received your message and will get back to you at {email} within 24-48 hours."
    )
}

/// Body of the toast shown for a location's directions button.
pub fn directions_message(location: &str, address: &str) -> String {
    format!(
        "Opening directions to {location}. In a real application, this would open Google Maps with the address: {address}"
    )
}
