//! Macros for ergonomic state declaration.

/// Generate a state enum and its `State` implementation.
///
/// The `sentinel` variant is added as the first variant, marked as the
/// default, and named `""`. It stands for "no current state" and cannot be
/// declared in a machine.
///
/// # Example
///
/// ```
/// use switchyard::core::State;
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Opened,
///         Closed,
///     }
///     sentinel: Unset
/// }
///
/// assert_eq!(Door::Opened.name(), "Opened");
/// assert!(Door::default().is_sentinel());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        sentinel: $sentinel:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            Default,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            #[default]
            $sentinel,
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    Self::$sentinel => "",
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
