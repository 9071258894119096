//! Tagged unions of arena handles.

use super::{Arena, Node};
use crate::TokenId;

/// Gives an alternative's resources back to the arena.
///
/// Only the outer node is destroyed; values it owns stay in their pools until
/// the arena drops.
pub trait Release {
    fn release<const C: usize>(self, arena: &mut Arena<C>);
}

impl<T: 'static> Release for Node<T> {
    fn release<const C: usize>(self, arena: &mut Arena<C>) {
        drop(self.destroy(arena));
    }
}

impl Release for TokenId {
    fn release<const C: usize>(self, _: &mut Arena<C>) {}
}

/// One alternative of a variant `V`.
pub trait Alternative<V>: Sized {
    fn extract(variant: &V) -> Option<&Self>;
}

/// Declare a tagged union of arena handles and token ids.
///
/// The generated enum gets an `Empty` default plus:
///
/// - `is::<P>()` / `get::<P>()` by alternative type
/// - `From<P>` for every alternative
/// - `replace(arena, value)`, which releases the previous alternative
/// - `release(arena)` and `take()`
///
/// Each alternative type may appear once.
#[macro_export]
macro_rules! node_variant {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident($payload:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        $vis enum $name {
            #[default]
            Empty,
            $($(#[$vmeta])* $variant($payload)),+
        }

        impl $name {
            #[inline]
            pub fn is_empty(&self) -> bool {
                matches!(self, $name::Empty)
            }

            #[inline]
            pub fn is<P: $crate::Alternative<Self>>(&self) -> bool {
                P::extract(self).is_some()
            }

            #[inline]
            pub fn get<P: $crate::Alternative<Self>>(&self) -> Option<&P> {
                P::extract(self)
            }

            /// Swap in `value`, releasing the previous alternative.
            pub fn replace<const C: usize>(
                &mut self,
                arena: &mut $crate::Arena<C>,
                value: impl Into<Self>,
            ) {
                std::mem::replace(self, value.into()).release(arena);
            }

            pub fn release<const C: usize>(self, arena: &mut $crate::Arena<C>) {
                match self {
                    $name::Empty => {}
                    $($name::$variant(payload) => $crate::Release::release(payload, arena),)+
                }
            }

            #[inline]
            pub fn take(&mut self) -> Self {
                std::mem::take(self)
            }
        }

        $(
            impl From<$payload> for $name {
                #[inline]
                fn from(payload: $payload) -> Self {
                    $name::$variant(payload)
                }
            }

            impl $crate::Alternative<$name> for $payload {
                #[inline]
                fn extract(variant: &$name) -> Option<&Self> {
                    match variant {
                        $name::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }
        )+
    };
}
