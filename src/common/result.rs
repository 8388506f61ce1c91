use crate::common::error::XdockError;

/// xdockプロジェクト全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use xdock::common::result::XdockResult;
/// use xdock::common::error::XdockError;
///
/// fn example_function() -> XdockResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> XdockResult<()> {
///     Err(XdockError::template_not_found("php-app"))
/// }
/// ```
pub type XdockResult<T> = Result<T, XdockError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// NoneをMalformedCatalogエラーに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use xdock::common::result::{XdockResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: XdockResult<String> = none_value.ok_or_malformed("missing docker-compose");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_malformed(self, message: impl Into<String>) -> XdockResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_malformed(self, message: impl Into<String>) -> XdockResult<T> {
        self.ok_or_else(|| XdockError::malformed_catalog(message))
    }
}

/// Result型のエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// エラーをファイルシステムエラーに変換する
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> XdockResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> XdockResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| XdockError::filesystem_error_with_source(message, path, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_option_ext_ok_or_malformed() {
        let none_value: Option<i32> = None;
        let result = none_value.ok_or_malformed("missing docker-compose");
        match result {
            Err(XdockError::MalformedCatalog { message, .. }) => {
                assert_eq!(message, "missing docker-compose")
            }
            other => panic!("Expected MalformedCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_result_ext_with_filesystem_error() {
        let io_result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let result =
            io_result.with_filesystem_error("write failed", Some(PathBuf::from("out.yml")));
        match result {
            Err(XdockError::FileSystemError { path, .. }) => {
                assert_eq!(path, Some(PathBuf::from("out.yml")))
            }
            other => panic!("Expected FileSystemError, got {:?}", other),
        }
    }
}
