//! NewsletterForm - submission stays on the page and clears the form

use crate::application::ports::NodeId;
use crate::shared::config::Selectors;
use crate::widget::Surface;

#[derive(Debug)]
pub struct NewsletterForm {
    form: NodeId,
}

impl NewsletterForm {
    pub fn mount(cx: &mut Surface, selectors: &Selectors) -> Option<Self> {
        let form = cx.document.query(&selectors.newsletter_form)?;
        Some(Self { form })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn on_submit(&self, cx: &mut Surface) {
        log!("NewsletterForm: submitted");
        cx.document.reset_form(self.form);
    }
}
