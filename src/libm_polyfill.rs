// Copyright 2024 the quadroot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float methods for `no_std` builds, backed by `libm`.

pub(crate) trait FloatFuncs: Sized {
    fn abs(self) -> Self;
    fn copysign(self, sign: Self) -> Self;
    fn sqrt(self) -> Self;
}

impl FloatFuncs for f64 {
    #[inline]
    fn abs(self) -> Self {
        libm::fabs(self)
    }

    #[inline]
    fn copysign(self, sign: Self) -> Self {
        libm::copysign(self, sign)
    }

    #[inline]
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
}
