use super::{PageTarget, SmsRoute};

/// The SMS sent once the match phrase has disappeared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub route: SmsRoute,
    pub body: String,
}

impl Alert {
    pub fn phrase_gone(target: &PageTarget, route: &SmsRoute) -> Self {
        Self {
            route: route.clone(),
            body: disappearance_message(target),
        }
    }
}

/// `"<url>" no longer has "<phrase>"`, both values quoted and escaped.
pub fn disappearance_message(target: &PageTarget) -> String {
    format!("{:?} no longer has {:?}", target.url, target.phrase)
}
