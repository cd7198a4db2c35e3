// ==========================================
// 货代报价比选系统 - 调用方认证
// ==========================================
// 职责: Bearer token → 调用方身份
// 说明: 身份体系由外部服务维护，这里只定义接入点与静态实现
// ==========================================

use std::collections::HashMap;

/// 已认证的调用方
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// 认证接口
pub trait Authenticator: Send + Sync {
    /// token 无效或未知时返回 None
    fn authenticate(&self, bearer_token: &str) -> Option<CallerIdentity>;
}

// ==========================================
// StaticTokenAuthenticator - 静态 token 表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuthenticator {
    /// # 参数
    /// - tokens: (token, user_id) 列表，重复 token 以后者为准
    pub fn new<I, T, U>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(token, user)| (token.into(), user.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn authenticate(&self, bearer_token: &str) -> Option<CallerIdentity> {
        let token = bearer_token.trim();
        if token.is_empty() {
            return None;
        }
        self.tokens.get(token).map(CallerIdentity::new)
    }
}
