//! CSV rendering for post reports.

use std::borrow::Cow;

use postboard_core::domain::Post;

/// First line of every report.
pub const CSV_HEADER: &str = "Post ID;Title;Content;Likes Count;Published;User ID";

const DELIMITER: char = ';';

/// Render `posts` as a `;`-separated report, one line per post.
pub fn render_csv(posts: &[Post]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + posts.len() * 64);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for post in posts {
        csv.push_str(&format!(
            "{id};{title};{content};{likes};{published};{user_id}\n",
            id = post.id,
            title = escape(&post.title),
            content = escape(&post.content),
            likes = post.likes_count,
            published = post.published,
            user_id = post.user_id,
        ));
    }

    csv
}

/// Quote a field if it contains the delimiter, a quote or a line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
