use std::collections::HashSet;

/// Reduces user-authored text to plain text.
///
/// ammonia drops every tag, along with the bodies of `<script>` and `<style>`.
/// Its output is entity-escaped HTML, so the entities are decoded again: what
/// gets stored is the text the user typed, minus markup. Message text and bios
/// go through this before they are length-checked and stored.
pub fn clean_text(input: &str) -> String {
    let cleaned = ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string();

    html_escape::decode_html_entities(&cleaned).into_owned()
}

#[cfg(test)]
mod tests {
    use super::clean_text;

    #[test]
    fn strips_script_keeps_text() {
        assert_eq!(clean_text("hello<script>alert(1)</script>"), "hello");
        assert_eq!(clean_text("<b>bold</b> move"), "bold move");
        assert_eq!(clean_text("plain warble"), "plain warble");
    }

    #[test]
    fn plain_text_is_not_entity_escaped() {
        assert_eq!(clean_text("Tom & Jerry <3"), "Tom & Jerry <3");
        assert_eq!(clean_text(&"&".repeat(140)), "&".repeat(140));
    }
}
