use std::cell::Cell;
use std::collections::BTreeMap;

use log::{debug, error, info, warn};

use super::machine::{FormEvent, SubmissionState};
use super::validate::{FormField, ValidationReport};
use crate::config::{ElementIds, SiteConfig};
use crate::error::RelayError;
use crate::traits::{ElementHandle, MailRelay};


/// What one call to [`ContactSubmission::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// An earlier attempt is still in flight; nothing was touched.
    Busy,
    /// At least one field failed; no request was made.
    Rejected(ValidationReport),
    Delivered,
    Failed(RelayError),
}

/// The values sent to the mail relay, as the visitor typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub extra_fields: BTreeMap<String, String>,
}

impl ContactPayload {
    /// Form parts in send order: the three fields, then the extras.
    pub fn parts(&self) -> Vec<(&str, &str)> {
        let mut parts = vec![
            (FormField::Name.as_str(), self.name.as_str()),
            (FormField::Email.as_str(), self.email.as_str()),
            (FormField::Message.as_str(), self.message.as_str()),
        ];
        parts.extend(self.extra_fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        parts
    }
}

pub struct FormElements<E> {
    pub form: E,
    pub name: E,
    pub email: E,
    pub message: E,
    pub submit: E,

    pub name_error: Option<E>,
    pub email_error: Option<E>,
    pub message_error: Option<E>,
    pub success_banner: Option<E>,
    pub failure_banner: Option<E>,
    pub loader: Option<E>,
}

impl<E: ElementHandle> FormElements<E> {
    /// Look every element up once. Returns `None` when the form itself, one of
    /// its inputs or the submit control is missing.
    pub fn resolve(ids: &ElementIds, lookup: impl Fn(&str) -> Option<E>) -> Option<Self> {
        let required = |id: &str| {
            let found = lookup(id);
            if found.is_none() {
                debug!("contact form element #{} not found", id);
            }
            found
        };

        Some(Self {
            form: required(&ids.contact_form)?,
            name: required(&ids.name)?,
            email: required(&ids.email)?,
            message: required(&ids.message)?,
            submit: required(&ids.submit)?,

            name_error: lookup(&ids.name_error),
            email_error: lookup(&ids.email_error),
            message_error: lookup(&ids.message_error),
            success_banner: lookup(&ids.success_banner),
            failure_banner: lookup(&ids.failure_banner),
            loader: lookup(&ids.loader),
        })
    }

    fn input(&self, field: FormField) -> &E {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    fn indicator(&self, field: FormField) -> Option<&E> {
        match field {
            FormField::Name => self.name_error.as_ref(),
            FormField::Email => self.email_error.as_ref(),
            FormField::Message => self.message_error.as_ref(),
        }
    }
}

/// Validates the contact form and hands it to a [`MailRelay`].
pub struct ContactSubmission<E, R> {
    elements: FormElements<E>,
    relay: R,
    hidden_class: String,
    invalid_class: String,
    extra_fields: BTreeMap<String, String>,
    state: Cell<SubmissionState>,
}

impl<E, R> ContactSubmission<E, R>
where
    E: ElementHandle,
    R: MailRelay,
{
    pub fn new(elements: FormElements<E>, relay: R, config: &SiteConfig) -> Self {
        Self {
            elements,
            relay,
            hidden_class: config.classes.hidden.clone(),
            invalid_class: config.classes.invalid.clone(),
            extra_fields: config.contact.extra_fields.clone(),
            state: Cell::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    /// Run one attempt. The caller has already stopped the browser's own
    /// form submission.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.state.get().is_busy() {
            debug!("submit ignored, attempt already in {:?}", self.state.get());
            return SubmitOutcome::Busy;
        }

        self.dispatch(FormEvent::Submit);
        self.show(self.elements.success_banner.as_ref(), false);
        self.show(self.elements.failure_banner.as_ref(), false);

        let report = self.validate();
        if !report.is_valid() {
            debug!("contact form rejected: {:?}", report.failing());
            self.dispatch(FormEvent::ValidationFailed);
            return SubmitOutcome::Rejected(report);
        }

        self.dispatch(FormEvent::ValidationPassed);
        let payload = self.payload();

        let _busy = BusyGuard::engage(self);
        let sent = self.relay.send(&payload).await;

        match sent {
            Ok(status) if (200..300).contains(&status) => {
                self.delivered();
                SubmitOutcome::Delivered
            }
            Ok(status) => self.failed(RelayError::Status(status)),
            Err(err) => self.failed(err),
        }
    }

    /// Check all three fields and update their indicators.
    pub fn validate(&self) -> ValidationReport {
        let report = ValidationReport::check(
            &self.elements.name.value(),
            &self.elements.email.value(),
            &self.elements.message.value(),
        );

        for field in FormField::ALL {
            let passed = report.passed(field);
            self.show(self.elements.indicator(field), !passed);
            self.elements.input(field).set_class(&self.invalid_class, !passed);
        }

        report
    }

    pub fn payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.elements.name.value(),
            email: self.elements.email.value(),
            message: self.elements.message.value(),
            extra_fields: self.extra_fields.clone(),
        }
    }

    fn delivered(&self) {
        info!("contact message delivered");
        self.dispatch(FormEvent::Delivered);
        self.show(self.elements.success_banner.as_ref(), true);
        self.show(self.elements.failure_banner.as_ref(), false);
        for field in FormField::ALL {
            self.elements.input(field).set_value("");
        }
    }

    fn failed(&self, err: RelayError) -> SubmitOutcome {
        warn!("contact message not delivered: {}", err);
        self.dispatch(FormEvent::DeliveryFailed);
        self.show(self.elements.failure_banner.as_ref(), true);
        self.show(self.elements.success_banner.as_ref(), false);
        SubmitOutcome::Failed(err)
    }

    fn dispatch(&self, event: FormEvent) {
        let from = self.state.get();
        match from.on(event) {
            Ok(to) => {
                debug!("contact form {:?} -> {:?}", from, to);
                self.state.set(to);
            }
            Err(err) => error!("{}", err),
        }
    }

    fn show(&self, element: Option<&E>, visible: bool) {
        if let Some(element) = element {
            element.set_class(&self.hidden_class, !visible);
        }
    }
}

/// Shows the loader and locks the submit control for as long as it lives.
///
/// Dropping it settles the attempt whatever happened in between, including
/// the request future being dropped mid-flight.
struct BusyGuard<'a, E, R>
where
    E: ElementHandle,
    R: MailRelay,
{
    submission: &'a ContactSubmission<E, R>,
}

impl<'a, E, R> BusyGuard<'a, E, R>
where
    E: ElementHandle,
    R: MailRelay,
{
    fn engage(submission: &'a ContactSubmission<E, R>) -> Self {
        submission.show(submission.elements.loader.as_ref(), true);
        submission.elements.submit.set_disabled(true);
        Self { submission }
    }
}

impl<E, R> Drop for BusyGuard<'_, E, R>
where
    E: ElementHandle,
    R: MailRelay,
{
    fn drop(&mut self) {
        let submission = self.submission;
        submission.show(submission.elements.loader.as_ref(), false);
        submission.elements.submit.set_disabled(false);

        match submission.state.get() {
            SubmissionState::Succeeded | SubmissionState::Failed => submission.dispatch(FormEvent::Settled),
            other => {
                warn!("contact submission abandoned while {:?}", other);
                submission.state.set(SubmissionState::Idle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockElement, MockRelay, Snapshot};

    struct Page {
        name: MockElement,
        email: MockElement,
        message: MockElement,
        submit: MockElement,
        name_error: MockElement,
        email_error: MockElement,
        message_error: MockElement,
        success: MockElement,
        failure: MockElement,
        loader: MockElement,
    }

    impl Page {
        fn filled(name: &str, email: &str, message: &str) -> Self {
            Self {
                name: MockElement::with_value(name),
                email: MockElement::with_value(email),
                message: MockElement::with_value(message),
                submit: MockElement::new(),
                name_error: MockElement::with_class("hidden"),
                email_error: MockElement::with_class("hidden"),
                message_error: MockElement::with_class("hidden"),
                success: MockElement::with_class("hidden"),
                failure: MockElement::with_class("hidden"),
                loader: MockElement::with_class("hidden"),
            }
        }

        fn elements(&self) -> FormElements<MockElement> {
            FormElements {
                form: MockElement::new(),
                name: self.name.clone(),
                email: self.email.clone(),
                message: self.message.clone(),
                submit: self.submit.clone(),
                name_error: Some(self.name_error.clone()),
                email_error: Some(self.email_error.clone()),
                message_error: Some(self.message_error.clone()),
                success_banner: Some(self.success.clone()),
                failure_banner: Some(self.failure.clone()),
                loader: Some(self.loader.clone()),
            }
        }

        fn submission(&self, relay: MockRelay) -> ContactSubmission<MockElement, MockRelay> {
            ContactSubmission::new(self.elements(), relay.watching(&self.loader, &self.submit), &SiteConfig::default())
        }

        fn values(&self) -> (String, String, String) {
            (self.name.value(), self.email.value(), self.message.value())
        }
    }

    #[tokio::test]
    async fn whitespace_name_is_the_only_error() {
        let page = Page::filled("  ", "x@y.com", "hi");
        let submission = page.submission(MockRelay::answering(Ok(200)));

        let outcome = submission.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(report) if report.failing() == vec![FormField::Name]));
        assert!(!page.name_error.is_hidden());
        assert!(page.name.has_class("border-red-500"));
        assert!(page.email_error.is_hidden());
        assert!(page.message_error.is_hidden());
        assert_eq!(submission.relay.calls(), 0);
        assert_eq!(submission.state(), SubmissionState::Idle);
        assert!(page.loader.is_hidden());
    }

    #[tokio::test]
    async fn each_indicator_depends_only_on_its_own_field() {
        let good = ("Ada", "ada@lovelace.uk", "Hello");
        let bad = ("", "ada@lovelace", " ");

        for mask in 0..8u8 {
            let name_ok = mask & 1 != 0;
            let email_ok = mask & 2 != 0;
            let message_ok = mask & 4 != 0;

            let page = Page::filled(
                if name_ok { good.0 } else { bad.0 },
                if email_ok { good.1 } else { bad.1 },
                if message_ok { good.2 } else { bad.2 },
            );
            let submission = page.submission(MockRelay::answering(Ok(200)));
            let outcome = submission.submit().await;

            assert_eq!(page.name_error.is_hidden(), name_ok, "mask {mask}");
            assert_eq!(page.email_error.is_hidden(), email_ok, "mask {mask}");
            assert_eq!(page.message_error.is_hidden(), message_ok, "mask {mask}");
            assert_eq!(page.name.has_class("border-red-500"), !name_ok, "mask {mask}");
            assert_eq!(page.email.has_class("border-red-500"), !email_ok, "mask {mask}");
            assert_eq!(page.message.has_class("border-red-500"), !message_ok, "mask {mask}");

            let all_ok = mask == 7;
            assert_eq!(submission.relay.calls(), usize::from(all_ok), "mask {mask}");
            assert_eq!(outcome == SubmitOutcome::Delivered, all_ok, "mask {mask}");
        }
    }

    #[tokio::test]
    async fn delivered_message_clears_the_form() {
        let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
        let submission = page.submission(MockRelay::answering(Ok(200)));

        assert_eq!(submission.submit().await, SubmitOutcome::Delivered);

        assert!(!page.success.is_hidden());
        assert!(page.failure.is_hidden());
        assert_eq!(page.values(), (String::new(), String::new(), String::new()));
        assert_eq!(submission.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn loader_is_shown_only_while_the_request_runs() {
        for response in [Ok(200), Ok(503), Err(RelayError::Transport("offline".to_string()))] {
            let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
            let submission = page.submission(MockRelay::answering(response));

            submission.submit().await;

            assert_eq!(
                *submission.relay.snapshots.borrow(),
                vec![Snapshot { loader_visible: true, submit_disabled: true }]
            );
            assert!(page.loader.is_hidden());
            assert!(!page.submit.is_disabled());
        }
    }

    #[tokio::test]
    async fn error_status_keeps_what_was_typed() {
        let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
        let submission = page.submission(MockRelay::answering(Ok(422)));

        assert_eq!(submission.submit().await, SubmitOutcome::Failed(RelayError::Status(422)));

        assert!(!page.failure.is_hidden());
        assert!(page.success.is_hidden());
        assert_eq!(
            page.values(),
            ("Ada".to_string(), "ada@lovelace.uk".to_string(), "Hello there".to_string())
        );
        assert_eq!(submission.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn transport_error_is_a_failure() {
        let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
        let err = RelayError::Transport("connection reset".to_string());
        let submission = page.submission(MockRelay::answering(Err(err.clone())));

        assert_eq!(submission.submit().await, SubmitOutcome::Failed(err));
        assert!(!page.failure.is_hidden());
        assert!(page.success.is_hidden());
        assert_eq!(page.name.value(), "Ada");
    }

    #[tokio::test]
    async fn new_attempt_hides_the_previous_banner() {
        let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
        let submission = page.submission(MockRelay::answering(Ok(200)));
        submission.submit().await;
        assert!(!page.success.is_hidden());

        // The form is empty now, so this attempt only validates.
        let outcome = submission.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert!(page.success.is_hidden());
        assert!(page.failure.is_hidden());
        assert_eq!(submission.relay.calls(), 1);
    }

    #[tokio::test]
    async fn second_submit_while_sending_is_ignored() {
        let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
        let submission = page.submission(MockRelay::answering(Ok(200)));

        let (first, second) = tokio::join!(submission.submit(), submission.submit());

        assert_eq!(first, SubmitOutcome::Delivered);
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(submission.relay.calls(), 1);
    }

    #[tokio::test]
    async fn dropping_the_attempt_still_unlocks_the_form() {
        let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
        let submission = page.submission(MockRelay::answering(Ok(200)));

        tokio::select! {
            biased;
            _ = submission.submit() => panic!("relay should still be in flight"),
            _ = std::future::ready(()) => {}
        }

        assert_eq!(submission.relay.calls(), 1);
        assert!(page.loader.is_hidden());
        assert!(!page.submit.is_disabled());
        assert_eq!(submission.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn payload_carries_raw_values_and_extras() {
        let page = Page::filled(" Ada ", "ada@lovelace.uk", "Hi\n");
        let mut config = SiteConfig::default();
        config.contact.extra_fields.insert("_subject".to_string(), "Portfolio".to_string());
        let submission = ContactSubmission::new(page.elements(), MockRelay::answering(Ok(201)), &config);

        assert_eq!(submission.submit().await, SubmitOutcome::Delivered);

        let sent = submission.relay.sent.borrow();
        assert_eq!(
            sent[0].parts(),
            vec![("name", " Ada "), ("email", "ada@lovelace.uk"), ("message", "Hi\n"), ("_subject", "Portfolio")]
        );
    }

    #[test]
    fn missing_required_element_disables_the_form() {
        let ids = ElementIds::default();

        let without_submit = FormElements::resolve(&ids, |id| (id != "submitBtn").then(MockElement::new));
        assert!(without_submit.is_none());

        let without_banners = FormElements::resolve(&ids, |id| {
            (!matches!(id, "successMsg" | "errorMsg" | "loader" | "nameError")).then(MockElement::new)
        });
        let elements = without_banners.expect("required elements are present");
        assert!(elements.success_banner.is_none());
        assert!(elements.loader.is_none());
        assert!(elements.name_error.is_none());
        assert!(elements.email_error.is_some());
    }

    #[tokio::test]
    async fn works_without_optional_elements() {
        let page = Page::filled("Ada", "ada@lovelace.uk", "Hello there");
        let elements = FormElements {
            name_error: None,
            email_error: None,
            message_error: None,
            success_banner: None,
            failure_banner: None,
            loader: None,
            ..page.elements()
        };
        let submission = ContactSubmission::new(elements, MockRelay::answering(Ok(500)), &SiteConfig::default());

        assert_eq!(submission.submit().await, SubmitOutcome::Failed(RelayError::Status(500)));
        assert!(!page.submit.is_disabled());
    }
}
