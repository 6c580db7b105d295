// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use crate::{MarkSource, Result};

macro_rules! delegate_impl {
    (with $reduced:expr;
	$(
	fn $name:ident($($params:tt)+)$( -> $ret:ty)?;
	)+) => {
		$(fn $name($($params)+)$( -> $ret)? {
			delegate_impl!(@$reduced;$name($($params)+))
		})+
	};
	(@$reduced:expr;$name:ident(&$(mut)? self$(, $param:ident: $param_ty:ty)*)) => {
		$reduced.$name($($param),*)
	};
}

macro_rules! impl_mark_source {
    ($(impl<$gen:ident> for $ty:ty;)+) => {
		$(
		impl<$gen: MarkSource + ?Sized> MarkSource for $ty {
			delegate_impl! {
				with (**self);
				fn mark(&mut self);
				fn reset(&mut self) -> Result;
			}
		})+
	};
}

impl_mark_source! {
	impl<S> for &mut S;
	impl<S> for Box<S>;
}
