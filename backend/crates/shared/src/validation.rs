//! Declarative Request Validation
//!
//! リクエストボディの検証を宣言的に行うためのユーティリティです。
//! 検証は例外制御ではなく、フィールド違反のリストを持つ
//! タグ付き結果（`Ok(value)` / `Err(Violations)`）を返します。
//!
//! ## Usage
//! ```rust
//! use kernel::validation::Violations;
//!
//! let mut v = Violations::new();
//! let title = "";
//! if title.trim().is_empty() {
//!     v.push("title", "Request format is invalid.");
//! }
//! assert!(v.into_result(()).is_err());
//! ```

use std::fmt;

/// 単一フィールドの検証違反
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// 違反したフィールド名
    pub field: &'static str,
    /// ユーザー向けメッセージ
    pub message: String,
}

/// 検証違反の集合
///
/// 全フィールドを検証してから一括で返すため、最初の違反で
/// 打ち切らずに `push` で蓄積します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// 空の違反リストを作成
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 違反を追加
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// 違反が無いかどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 違反の数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 最初の違反メッセージ（レスポンス本文用）
    pub fn first_message(&self) -> Option<&str> {
        self.0.first().map(|v| v.message.as_str())
    }

    /// 全ての違反を参照
    pub fn as_slice(&self) -> &[FieldViolation] {
        &self.0
    }

    /// 違反が無ければ `Ok(value)`、あれば `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, Violations> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

// ============================================================================
// Common validation rules
// ============================================================================

/// 必須文字列フィールドの検証
///
/// 空または空白のみの場合に違反を追加します。
pub fn require_non_empty(v: &mut Violations, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        v.push(field, message);
    }
}

/// 最小文字数の検証（文字数はコードポイント単位）
pub fn require_min_chars(
    v: &mut Violations,
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) {
    if value.chars().count() < min {
        v.push(field, message);
    }
}
