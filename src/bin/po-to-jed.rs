// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Convert a PO file to JED JSON for WordPress.
//!
//! Run this from the plugin directory. Without arguments, it reads
//! `languages/gutenblock-pro-en_US.po` and writes the JED file that
//! WordPress loads for `build/index.js`. The flags below override the
//! directory, text domain, locale and hash.

use anyhow::Context;
use clap::Parser;
use log::debug;
use po_to_jed::jed::{self, build_document, write_document, Config};
use po_to_jed::read_catalog;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the PO file and the generated JSON.
    #[arg(long, default_value = jed::DEFAULT_LANGUAGES_DIR)]
    languages_dir: PathBuf,
    /// Text domain of the plugin.
    #[arg(long, default_value = jed::DEFAULT_DOMAIN)]
    domain: String,
    /// Locale of the translations.
    #[arg(long, default_value = jed::DEFAULT_LOCALE)]
    locale: String,
    /// Value of the `plural_forms` header.
    #[arg(long, default_value = jed::DEFAULT_PLURAL_FORMS)]
    plural_forms: String,
    /// MD5 of the script path, as used by WordPress in the file name.
    #[arg(long, default_value = jed::DEFAULT_DIGEST)]
    digest: String,
    /// Read this PO file instead of `<languages-dir>/<domain>-<locale>.po`.
    #[arg(long, value_name = "FILE.po")]
    input: Option<PathBuf>,
    /// Write to this file instead of `<languages-dir>/<domain>-<locale>-<digest>.json`.
    #[arg(long, value_name = "FILE.json")]
    output: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            languages_dir: self.languages_dir.clone(),
            domain: self.domain.clone(),
            locale: self.locale.clone(),
            plural_forms: self.plural_forms.clone(),
            digest: self.digest.clone(),
        }
    }
}

/// Convert the PO file selected by `args`, returning the output path.
fn run(args: &Args) -> anyhow::Result<PathBuf> {
    let config = args.config();
    let po_path = args.input.clone().unwrap_or_else(|| config.po_path());
    let json_path = args.output.clone().unwrap_or_else(|| config.json_path());

    debug!("Reading translations from {}", po_path.display());
    let catalog = read_catalog(&po_path)?;
    debug!("Found {} messages", catalog.len());

    let document = build_document(&catalog, &config);
    write_document(&document, &json_path)
        .with_context(|| format!("Converting {}", po_path.display()))?;
    Ok(json_path)
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let args = Args::parse();
    let output = run(&args)?;
    println!("Wrote {}", output.display());
    Ok(())
}
