//! Dependency injection modules using Shaku.
//!
//! - `PostgresModule`: PostgreSQL repositories with the Redis cache store
//! - `MemoryModule`: in-memory repositories with an in-process cache store,
//!   for local development and demos

use deadpool_redis::{Config as RedisPoolConfig, PoolConfig, Runtime};
use newsroom_config::{AppConfig, RedisConfig};
use newsroom_core::{NewsroomError, NewsroomResult};
use newsroom_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, InMemoryCommentRepository,
    InMemoryLikeRepository, InMemoryNewsRepository, InMemoryNewsStatsRepository,
    InMemoryUserRepository, InMemoryVideoRepository, PgCommentRepository, PgLikeRepository,
    PgNewsRepository, PgNewsStatsRepository, PgUserRepository, PgVideoRepository,
};
use newsroom_service::{
    CacheSettings, CacheStore, Clock, CommentService, CommentServiceComponent,
    InMemoryCacheStore, InMemoryCacheStoreParameters, LikeService, LikeServiceComponent,
    NewsService, NewsServiceComponent, NewsServiceComponentParameters, RedisCacheStore,
    RedisCacheStoreParameters, SystemClock, UserService, UserServiceComponent,
    UserServiceComponentParameters, VideoService, VideoServiceComponent,
    VideoServiceComponentParameters,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub PostgresModule {
        components = [
            DatabasePool,
            PgNewsRepository,
            PgVideoRepository,
            PgUserRepository,
            PgCommentRepository,
            PgLikeRepository,
            PgNewsStatsRepository,
            RedisCacheStore,
            NewsServiceComponent,
            VideoServiceComponent,
            UserServiceComponent,
            CommentServiceComponent,
            LikeServiceComponent,
        ],
        providers = [],
    }
}

module! {
    pub MemoryModule {
        components = [
            InMemoryNewsRepository,
            InMemoryVideoRepository,
            InMemoryUserRepository,
            InMemoryCommentRepository,
            InMemoryLikeRepository,
            InMemoryNewsStatsRepository,
            InMemoryCacheStore,
            NewsServiceComponent,
            VideoServiceComponent,
            UserServiceComponent,
            CommentServiceComponent,
            LikeServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the PostgreSQL-backed module.
pub async fn build_postgres_module(config: &AppConfig) -> NewsroomResult<Arc<PostgresModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;
    let cache_pool = create_redis_pool(&config.redis)?;
    let settings = CacheSettings::from(&config.cache);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let module = PostgresModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheStore>(RedisCacheStoreParameters {
            pool: cache_pool,
            clock: clock.clone(),
        })
        .with_component_parameters::<NewsServiceComponent>(NewsServiceComponentParameters {
            cache_settings: settings.clone(),
            clock: clock.clone(),
        })
        .with_component_parameters::<VideoServiceComponent>(VideoServiceComponentParameters {
            cache_settings: settings.clone(),
            clock: clock.clone(),
        })
        .with_component_parameters::<UserServiceComponent>(UserServiceComponentParameters {
            cache_settings: settings,
            clock,
        })
        .build();

    Ok(Arc::new(module))
}

/// Builds the in-memory module. Nothing outlives the process.
pub fn build_memory_module(config: &AppConfig) -> Arc<MemoryModule> {
    let settings = CacheSettings::from(&config.cache);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let module = MemoryModule::builder()
        .with_component_parameters::<InMemoryCacheStore>(InMemoryCacheStoreParameters {
            entries: Default::default(),
            clock: clock.clone(),
        })
        .with_component_parameters::<NewsServiceComponent>(NewsServiceComponentParameters {
            cache_settings: settings.clone(),
            clock: clock.clone(),
        })
        .with_component_parameters::<VideoServiceComponent>(VideoServiceComponentParameters {
            cache_settings: settings.clone(),
            clock: clock.clone(),
        })
        .with_component_parameters::<UserServiceComponent>(UserServiceComponentParameters {
            cache_settings: settings,
            clock,
        })
        .build();

    Arc::new(module)
}

/// Creates the Redis pool, or `None` when Redis is disabled.
///
/// Pool creation does not connect; an unreachable server only shows up as
/// cache fallbacks.
pub fn create_redis_pool(
    config: &RedisConfig,
) -> NewsroomResult<Option<Arc<deadpool_redis::Pool>>> {
    if !config.enabled {
        info!("Redis disabled, collection cache is bypassed");
        return Ok(None);
    }

    let mut redis_cfg = RedisPoolConfig::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size.max(1)));

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| NewsroomError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!("Redis pool created for {}", config.url);
    Ok(Some(Arc::new(pool)))
}

/// Resolves the services every module provides.
pub trait ServiceResolver {
    fn news_service(&self) -> Arc<dyn NewsService>;
    fn video_service(&self) -> Arc<dyn VideoService>;
    fn user_service(&self) -> Arc<dyn UserService>;
    fn comment_service(&self) -> Arc<dyn CommentService>;
    fn like_service(&self) -> Arc<dyn LikeService>;
    fn cache_store(&self) -> Arc<dyn CacheStore>;
}

macro_rules! service_resolver {
    ($module:ty) => {
        impl ServiceResolver for $module {
            fn news_service(&self) -> Arc<dyn NewsService> {
                self.resolve()
            }

            fn video_service(&self) -> Arc<dyn VideoService> {
                self.resolve()
            }

            fn user_service(&self) -> Arc<dyn UserService> {
                self.resolve()
            }

            fn comment_service(&self) -> Arc<dyn CommentService> {
                self.resolve()
            }

            fn like_service(&self) -> Arc<dyn LikeService> {
                self.resolve()
            }

            fn cache_store(&self) -> Arc<dyn CacheStore> {
                self.resolve()
            }
        }
    };
}

service_resolver!(PostgresModule);
service_resolver!(MemoryModule);

/// Resolves the database pool from modules that have one.
pub trait DatabaseResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for PostgresModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
