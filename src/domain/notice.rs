//! User-facing notices.
//!
//! Every failure the plugin can hit ends up as exactly one [`Notice`]: a modal
//! message the user acknowledges. The constructors below hold the notice texts
//! so the handler and the tests agree on them.

use super::error::CinemapaError;

/// A modal message with a title and a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    /// Creates a notice from any pair of strings.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// The search was submitted with a blank title.
    #[must_use]
    pub fn invalid_title() -> Self {
        Self::new("Aviso", "Por favor, insira um título de filme válido.")
    }

    /// The host refused location access.
    #[must_use]
    pub fn location_permission_denied() -> Self {
        Self::new(
            "Permissão de localização não concedida",
            "Por favor, conceda permissão de localização para obter a localização.",
        )
    }

    /// The position read failed after access was granted.
    #[must_use]
    pub fn location_unavailable() -> Self {
        Self::new("Erro", "Não foi possível obter a sua localização.")
    }

    /// Maps a point-of-interest fetch failure to its notice.
    ///
    /// An explicit API rejection and a transport failure read differently; the
    /// state effect is the same.
    #[must_use]
    pub fn points_of_interest_failed(error: &CinemapaError) -> Self {
        match error {
            CinemapaError::ApiRejected => Self::new("Erro", "Não foi possível buscar os dados."),
            _ => Self::new("Erro", "Houve um problema na busca dos dados."),
        }
    }

    /// Maps a movie search failure to its notice.
    #[must_use]
    pub fn movie_search_failed(error: &CinemapaError) -> Self {
        if error.is_transport() {
            Self::new(
                "Erro",
                "Houve um problema na busca do filme. Tente novamente mais tarde.",
            )
        } else {
            Self::new(
                "Erro",
                "Filme não encontrado. Verifique o título e tente novamente.",
            )
        }
    }
}
