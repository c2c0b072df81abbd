// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Pensketch headless driver

fn main() -> anyhow::Result<()> {
    pensketch::run()
}
