use axum::response::Response;
use scraper::Html;

async fn response_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

/// Parse the body of a response that renders a full page.
pub(crate) async fn parse_html_document(response: Response) -> Html {
    Html::parse_document(&response_text(response).await)
}

/// Parse the body of a response that renders a partial page, e.g. a form or an alert.
pub(crate) async fn parse_html_fragment(response: Response) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}
