pub mod arb_file;
pub mod encoding;
pub mod gen_l10n;
pub mod grouping;
pub mod project;
pub mod projection;
pub mod qa;
pub mod session;
pub mod storage;
pub mod translation_set;
