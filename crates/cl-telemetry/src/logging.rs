//! Structured logging helpers.
//!
//! Every record carries a `component` field naming the crate or tool that
//! emitted it, so JSON logs from different components can be filtered.

/// Log with a `component` field.
///
/// ```rust,ignore
/// log_event!(info, "resolver", "Filled order", order_hash = %hash);
/// ```
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an order-related event with the order hash attached.
#[macro_export]
macro_rules! log_order_event {
    ($level:ident, $component:expr, $msg:expr, $order_hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            order_hash = %$order_hash,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an escrow-related event with the escrow address and chain attached.
#[macro_export]
macro_rules! log_escrow_event {
    ($level:ident, $component:expr, $msg:expr, $escrow:expr, $chain_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            escrow = %$escrow,
            chain_id = $chain_id,
            $($($field)*,)?
            $msg
        )
    };
}
