use reqwest::RequestBuilder;

use crate::NotifyError;

const MAX_ERROR_BODY: usize = 512;

/// Sends the request and turns anything but a 2xx into [`NotifyError::Status`].
pub(crate) async fn send_checked(request: RequestBuilder) -> Result<(), NotifyError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();

    Err(NotifyError::Status {
        status: status.as_u16(),
        body: truncate(body),
    })
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }

    body
}
