// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_caret;
mod test_justify;
mod test_layout;
mod test_measure;
mod utils;
