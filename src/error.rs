use miette::{Diagnostic, SourceSpan};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result},
};

#[derive(Debug, Diagnostic)]
pub enum ThreadlabError {
    #[diagnostic(code(threadlab::terminal), url(docsrs))]
    Terminal {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(threadlab::event), url(docsrs))]
    Event {
        #[source_code]
        src: String,
        #[label("event error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(threadlab::worker), url(docsrs))]
    Worker {
        #[source_code]
        src: String,
        #[label("worker thread failed here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(threadlab::channel), url(docsrs))]
    ChannelClosed {
        #[source_code]
        src: String,
        #[label("channel closed")]
        err_span: SourceSpan,
    },
}

pub type ThreadlabResult<T> = miette::Result<T>;

// Helper functions to create errors with context
impl Display for ThreadlabError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ThreadlabError::Terminal { msg, .. } => write!(f, "Terminal error: {}", msg),
            ThreadlabError::Event { msg, .. } => write!(f, "Event error: {}", msg),
            ThreadlabError::Worker { msg, .. } => write!(f, "Worker error: {}", msg),
            ThreadlabError::ChannelClosed { .. } => write!(f, "Channel closed"),
        }
    }
}

impl Error for ThreadlabError {}

impl ThreadlabError {
    pub fn terminal(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Terminal {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn event(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Event {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn worker(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Worker {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn channel_closed(src: impl Into<String>, err_span: impl Into<SourceSpan>) -> Self {
        Self::ChannelClosed {
            src: src.into(),
            err_span: err_span.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = ThreadlabError::worker(
            "worker spawn".to_string(),
            (0, 12),
            "failed to spawn worker thread".to_string(),
        );

        match err {
            ThreadlabError::Worker { src, err_span, msg } => {
                assert_eq!(src, "worker spawn");
                assert_eq!(err_span, (0, 12).into());
                assert_eq!(msg, "failed to spawn worker thread");
            }
            _ => panic!("Wrong error variant"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = ThreadlabError::channel_closed("event channel", (0, 0));
        assert_eq!(err.to_string(), "Channel closed");
    }
}
