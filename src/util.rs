/*
 * Copyright 2015 Ben Ashford
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

// Miscellaneous code used in numerous places

/// Implement `From<$ft>` for `$dt` using the expression `$ex`, in which the
/// value being converted is bound to `$pi`
macro_rules! from_exp {
    ($ft:ty, $dt:ident, $pi:ident, $ex:expr) => {
        impl From<$ft> for $dt {
            fn from($pi: $ft) -> $dt {
                $ex
            }
        }
    };
}

/// Implement `From<$ft>` for the enum `$dt` by wrapping in variant `$ev`
macro_rules! from {
    ($ft:ty, $dt:ident, $ev:ident) => {
        from_exp!($ft, $dt, from, $dt::$ev(from));
    };
}

/// Builder-style setter for an optional field on a request struct
macro_rules! add_field {
    ($n:ident, $f:ident, $t:ty) => {
        pub fn $n<T: Into<$t>>(mut self, val: T) -> Self {
            self.$f = Some(val.into());
            self
        }
    };
}

/// Builder-style setter for a plain (non-optional) field on a request struct
macro_rules! add_value {
    ($n:ident, $f:ident, $t:ty) => {
        pub fn $n(mut self, val: $t) -> Self {
            self.$f = val;
            self
        }
    };
}
