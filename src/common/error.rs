// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro unificado, com `thiserror` para melhor ergonomia.
// As variantes de domínio carregam os dados que o chamador precisa para
// montar uma resposta; as de infraestrutura usam `#[from]` para que o
// operador `?` funcione em toda a aplicação.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Quantidade inválida: deve ser maior que zero")]
    InvalidQuantity,

    #[error("Estoque insuficiente: disponível {available}, solicitado {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Componente não encontrado")]
    ComponentNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Nível da hierarquia não encontrado")]
    HierarchyNodeNotFound,

    #[error("Já existe um registro com o nome '{0}' neste nível")]
    NameAlreadyExists(String),

    #[error("Não é possível excluir: existem registros filhos vinculados")]
    HierarchyNotEmpty,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Token expirado")]
    TokenExpired,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Indica se o erro é um conflito de unicidade (escrita rejeitada
    /// na borda do banco, não um erro de infraestrutura).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            AppError::NameAlreadyExists(_)
                | AppError::EmailAlreadyExists
                | AppError::HierarchyNotEmpty
        )
    }
}
