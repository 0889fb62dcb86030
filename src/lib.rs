//! linguist-catalog
//!
//! Qt Linguist の `.ts` 翻訳カタログを読み込み、(コンテキスト, ソース文字列) を
//! キーとして訳文を引くためのライブラリ。未翻訳・廃止済みエントリはソース文字列に
//! フォールバックする。

pub mod catalog;
pub mod config;
pub mod discover;
pub mod plural;
pub mod stats;
pub mod store;
pub mod syntax;
pub mod types;

mod test_utils;

// 主要な型を再エクスポート
pub use catalog::Catalog;
pub use store::CatalogStore;
