use crate::notice::UiNotice;

/// Surface that shows transient notifications.
///
/// Delivery is fire-and-forget; the surface owns the visible duration.
pub trait NotifierPort: Send + Sync {
    fn notify(&self, notice: UiNotice);
}
