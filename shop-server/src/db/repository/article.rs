//! Article Repository (blog posts and announcements)

use shared::error::ErrorCode;
use shared::models::{Article, ArticleCreate, ArticleUpdate};
use shared::util::{now_millis, snowflake_id};

use super::{RepoError, RepoResult};
use crate::db::{ARTICLES_TABLE, Storage};

#[derive(Clone)]
pub struct ArticleRepository {
    storage: Storage,
}

impl ArticleRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All articles including drafts, newest first
    pub fn find_all(&self) -> RepoResult<Vec<Article>> {
        let mut articles: Vec<Article> = self.storage.list(ARTICLES_TABLE)?;
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }

    /// Published articles, most recently published first
    pub fn find_published(&self) -> RepoResult<Vec<Article>> {
        let mut articles: Vec<Article> = self
            .storage
            .list::<Article>(ARTICLES_TABLE)?
            .into_iter()
            .filter(|a| a.published)
            .collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }

    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Article>> {
        Ok(self.storage.get(ARTICLES_TABLE, id)?)
    }

    pub fn create(&self, data: ArticleCreate, author_id: i64) -> RepoResult<Article> {
        let now = now_millis();
        let article = Article {
            id: snowflake_id(),
            kind: data.kind,
            title: data.title.trim().to_string(),
            body: data.body,
            author_id,
            published: data.published,
            published_at: data.published.then_some(now),
            created_at: now,
            updated_at: now,
        };
        self.storage.put(ARTICLES_TABLE, article.id, &article)?;
        Ok(article)
    }

    /// Update; the first publication stamps `published_at`
    pub fn update(&self, id: i64, data: ArticleUpdate) -> RepoResult<Article> {
        let txn = self.storage.begin_write()?;
        let mut article: Article =
            Storage::get_txn(&txn, ARTICLES_TABLE, id)?.ok_or_else(|| not_found(id))?;
        let now = now_millis();

        if let Some(kind) = data.kind {
            article.kind = kind;
        }
        if let Some(title) = data.title {
            article.title = title.trim().to_string();
        }
        if let Some(body) = data.body {
            article.body = body;
        }
        if let Some(published) = data.published {
            if published && article.published_at.is_none() {
                article.published_at = Some(now);
            }
            article.published = published;
        }

        article.updated_at = now;
        Storage::put_txn(&txn, ARTICLES_TABLE, id, &article)?;
        Storage::commit(txn)?;
        Ok(article)
    }

    pub fn delete(&self, id: i64) -> RepoResult<()> {
        if !self.storage.remove(ARTICLES_TABLE, id)? {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::rule(ErrorCode::ArticleNotFound, format!("Article {} not found", id))
}
