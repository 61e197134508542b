use leptos::prelude::*;

use crate::shared::error::AppError;
use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Inline, dismissible message shown next to the control that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Error => "notice notice--error",
            NoticeKind::Info => "notice notice--info",
        }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Notice::error(err.user_message())
    }
}

/// Renders `notice` while it is `Some`; the close button resets it.
#[component]
pub fn Notification(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            view! {
                <div class=n.class() role="alert">
                    <span class="notice__text">{n.text.clone()}</span>
                    <button class="notice__close" title="Cerrar" on:click=move |_| notice.set(None)>
                        {icon("close")}
                    </button>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_become_error_notices() {
        let n = Notice::from(&AppError::Timeout);
        assert_eq!(n.kind, NoticeKind::Error);
        assert_eq!(n.text, AppError::Timeout.user_message());
    }
}
