use super::{BuildContext, Handler};
use crate::error::HandlerError;

/// Opaque blob. Never inspects content, so never fails.
pub(crate) fn build(_ctx: &BuildContext<'_>) -> Result<Handler, HandlerError> { Ok(Handler::Simple) }
