//! Editable form state for the credentials screen and the workspace input panel.
//!
//! Text editing is append-only at the end of the buffer (type, backspace,
//! newline). No cursor movement inside a field.

use std::io;

use qa_assistant_core::types::{AnalysisRequest, InputMethod, Language};

/// Largest file the upload input method will read.
pub const MAX_UPLOAD_BYTES: u64 = 1024 * 1024;

/// A single editable text buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    /// Render as bullets (passwords, API keys).
    pub masked: bool,
    /// Enter inserts a newline instead of finishing the edit.
    pub multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self { masked: true, ..Self::default() }
    }

    pub fn multiline() -> Self {
        Self { multiline: true, ..Self::default() }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Appends a newline if multi-line. Returns `false` for single-line fields
    /// so the caller can treat Enter as "done".
    pub fn newline(&mut self) -> bool {
        if self.multiline {
            self.value.push('\n');
        }
        self.multiline
    }

    /// Text as it should appear on screen.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Which credentials field receives typed input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Sign-in / sign-up form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: TextField::single_line(),
            password: TextField::masked(),
            focus: LoginField::Email,
        }
    }
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Workspace input panel fields that accept typed text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Code editor, GitHub URL, or upload path depending on the input method.
    #[default]
    Source,
    Prompt,
    ApiKey,
}

impl InputField {
    pub fn next(self) -> Self {
        match self {
            InputField::Source => InputField::Prompt,
            InputField::Prompt => InputField::ApiKey,
            InputField::ApiKey => InputField::Source,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            InputField::Source => InputField::ApiKey,
            InputField::Prompt => InputField::Source,
            InputField::ApiKey => InputField::Prompt,
        }
    }
}

/// Everything the user has entered in the workspace input panel.
#[derive(Debug, Clone)]
pub struct InputForm {
    pub method: InputMethod,
    pub language: Language,
    pub code: TextField,
    pub github_url: TextField,
    pub upload_path: TextField,
    pub prompt: TextField,
    pub api_key: TextField,
    pub focus: InputField,
}

impl Default for InputForm {
    fn default() -> Self {
        Self {
            method: InputMethod::default(),
            language: Language::default(),
            code: TextField::multiline(),
            github_url: TextField::single_line(),
            upload_path: TextField::single_line(),
            prompt: TextField::multiline(),
            api_key: TextField::masked(),
            focus: InputField::default(),
        }
    }
}

impl InputForm {
    /// The source buffer for the active input method.
    pub fn source(&self) -> &TextField {
        match self.method {
            InputMethod::Paste => &self.code,
            InputMethod::Github => &self.github_url,
            InputMethod::Upload => &self.upload_path,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            InputField::Source => match self.method {
                InputMethod::Paste => &mut self.code,
                InputMethod::Github => &mut self.github_url,
                InputMethod::Upload => &mut self.upload_path,
            },
            InputField::Prompt => &mut self.prompt,
            InputField::ApiKey => &mut self.api_key,
        }
    }

    /// Builds the request for the gate.
    ///
    /// For uploads the file at `upload_path` is read here; a blank path yields
    /// blank code so the gate reports the missing source.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if a non-blank upload path cannot be read, or an
    /// `InvalidInput` error if the file exceeds [`MAX_UPLOAD_BYTES`].
    pub fn build_request(&self) -> io::Result<AnalysisRequest> {
        let code = match self.method {
            InputMethod::Paste => self.code.value.clone(),
            InputMethod::Github => self.github_url.value.trim().to_owned(),
            InputMethod::Upload => {
                let path = self.upload_path.value.trim();
                if path.is_empty() {
                    String::new()
                } else {
                    read_upload(path)?
                }
            }
        };
        let api_key = Some(self.api_key.value.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_owned);
        Ok(AnalysisRequest {
            input_method: self.method,
            code,
            prompt: self.prompt.value.clone(),
            language: self.language,
            api_key,
        })
    }
}

fn read_upload(path: &str) -> io::Result<String> {
    let len = std::fs::metadata(path)?.len();
    if len > MAX_UPLOAD_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("file is {} KiB, limit is {} KiB", len / 1024, MAX_UPLOAD_BYTES / 1024),
        ));
    }
    std::fs::read_to_string(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn masked_field_hides_characters() {
        let mut field = TextField::masked();
        for c in "secret".chars() {
            field.push(c);
        }
        assert_eq!(field.display(), "••••••");
        field.backspace();
        assert_eq!(field.value, "secre");
    }

    #[test]
    fn newline_only_in_multiline_fields() {
        let mut single = TextField::single_line();
        assert!(!single.newline());
        assert!(single.value.is_empty());

        let mut multi = TextField::multiline();
        assert!(multi.newline());
        assert_eq!(multi.value, "\n");
    }

    #[test]
    fn source_follows_input_method() {
        let mut form = InputForm::default();
        form.code.value = "fn main() {}".into();
        form.github_url.value = "  https://github.com/user/repo ".into();
        form.prompt.value = "p".into();

        let req = form.build_request().unwrap();
        assert_eq!(req.code, "fn main() {}");

        form.method = InputMethod::Github;
        let req = form.build_request().unwrap();
        assert_eq!(req.code, "https://github.com/user/repo");
        assert_eq!(req.input_method, InputMethod::Github);
        assert_eq!(req.api_key, None);
    }

    #[test]
    fn upload_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "print('hi')").unwrap();

        let mut form = InputForm { method: InputMethod::Upload, ..InputForm::default() };
        form.upload_path.value = file.path().to_string_lossy().into_owned();
        form.api_key.value = " sk-abcdefghijk ".into();

        let req = form.build_request().unwrap();
        assert_eq!(req.code, "print('hi')");
        assert_eq!(req.api_key.as_deref(), Some("sk-abcdefghijk"));
    }

    #[test]
    fn unreadable_upload_is_an_error_and_blank_path_is_blank_code() {
        let mut form = InputForm { method: InputMethod::Upload, ..InputForm::default() };
        assert_eq!(form.build_request().unwrap().code, "");

        form.upload_path.value = "/definitely/not/here.py".into();
        assert!(form.build_request().is_err());
    }

    #[test]
    fn oversized_upload_is_rejected_before_reading() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().set_len(MAX_UPLOAD_BYTES + 1).unwrap();

        let mut form = InputForm { method: InputMethod::Upload, ..InputForm::default() };
        form.upload_path.value = file.path().to_string_lossy().into_owned();

        let err = form.build_request().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("limit is 1024 KiB"));

        file.as_file().set_len(MAX_UPLOAD_BYTES).unwrap();
        assert!(form.build_request().is_ok());
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut field = InputField::Source;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, InputField::Source);
        assert_eq!(InputField::Source.prev(), InputField::ApiKey);
    }
}
