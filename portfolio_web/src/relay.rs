use gloo_net::http::Request;
use log::debug;
use web_sys::{FormData, HtmlFormElement};

use portfolio_core::contact::ContactPayload;
use portfolio_core::{MailRelay, RelayError};


/// Posts the form to a FormSubmit-style AJAX endpoint.
pub struct FormSubmitRelay {
    endpoint: String,
    form: Option<HtmlFormElement>,
}

impl FormSubmitRelay {
    /// With a `form`, its other named controls (hidden relay options and the
    /// like) are sent along with the payload.
    pub fn new(endpoint: String, form: Option<HtmlFormElement>) -> Self {
        Self { endpoint, form }
    }

    fn body(&self, payload: &ContactPayload) -> Result<FormData, RelayError> {
        let data = match &self.form {
            Some(form) => FormData::new_with_form(form),
            None => FormData::new(),
        }
        .map_err(|err| RelayError::Transport(format!("{:?}", err)))?;

        for (name, value) in payload.parts() {
            data.set_with_str(name, value)
                .map_err(|err| RelayError::Transport(format!("{:?}", err)))?;
        }
        Ok(data)
    }
}

impl MailRelay for FormSubmitRelay {
    async fn send(&self, payload: &ContactPayload) -> Result<u16, RelayError> {
        let body = self.body(payload)?;

        debug!("posting contact form to {}", self.endpoint);
        let response = Request::post(&self.endpoint)
            .body(body)
            .map_err(|err| RelayError::Transport(err.to_string()))?
            .send()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;

        Ok(response.status())
    }
}
