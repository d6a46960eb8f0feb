/// Builds a messaging deep link that opens a chat pre-filled with `text`.
///
/// `base_url` is the endpoint up to (not including) the query string, e.g.
/// `https://api.whatsapp.com/send` or `https://wa.me/`.
pub fn share_link(
    base_url: &str,
    text: &str,
) -> String {
    format!("{base_url}?text={}", urlencoding::encode(text))
}
