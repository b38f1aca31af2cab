use axum::response::Html;

static INDEX_HTML: &str = include_str!("../assets/index.html");

pub(super) async fn get_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
