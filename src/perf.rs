// ==========================================
// 货代报价比选系统 - SQL 性能观测
// ==========================================
// 职责: SQLite 语句计数 + 慢查询日志 + 单次操作耗时
// 约束: 计数是线程局部的，PerfGuard 只能在同步代码中持有（!Send），
//       异步路径经 run_blocking 把整段数据库访问放到同一个阻塞线程上
// 开关:
// - FQA_PERF_SQL=1 强制开启（Debug 默认开启，Release 默认关闭）
// - FQA_SLOW_SQL_MS=50 慢 SQL 阈值（毫秒）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const ENV_PERF_SQL: &str = "FQA_PERF_SQL";
pub const ENV_SLOW_SQL_MS: &str = "FQA_SLOW_SQL_MS";

const SQL_LOG_MAX_LEN: usize = 300;

static SQL_TRACING_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static ACTIVE_GUARDS: Cell<u32> = Cell::new(0);
    static SQL_COUNT: Cell<u64> = Cell::new(0);
    static SLOW_SQL_COUNT: Cell<u64> = Cell::new(0);
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        matches!(
            v.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn shorten_sql(sql: &str) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(SQL_LOG_MAX_LEN) {
        Some((cut, _)) => format!("{}…", &flat[..cut]),
        None => flat,
    }
}

/// 为连接安装 trace/profile 回调
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let enabled = env_flag(ENV_PERF_SQL).unwrap_or(cfg!(debug_assertions));
    SQL_TRACING_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    let slow_ms = std::env::var(ENV_SLOW_SQL_MS)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
    SLOW_SQL_MS.store(slow_ms, Ordering::Relaxed);

    conn.trace(Some(on_sql_statement));
    conn.profile(Some(on_sql_profiled));
}

fn guard_active() -> bool {
    ACTIVE_GUARDS.with(|d| d.get() > 0)
}

fn on_sql_statement(_sql: &str) {
    if SQL_TRACING_ENABLED.load(Ordering::Relaxed) && guard_active() {
        SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

fn on_sql_profiled(sql: &str, duration: Duration) {
    if !SQL_TRACING_ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_MS.load(Ordering::Relaxed);
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(target: "slow_sql", duration_ms = ms, sql = %shorten_sql(sql), "slow sql");
    if guard_active() {
        SLOW_SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// 单次操作统计：drop 时输出 elapsed_ms / sql_count / slow_sql_count
///
/// 不实现 Send：跨 `.await` 持有会在编译期被拒绝。
pub struct PerfGuard {
    op: &'static str,
    started: Instant,
    sql_base: u64,
    slow_sql_base: u64,
    _not_send: PhantomData<*const ()>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        ACTIVE_GUARDS.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            started: Instant::now(),
            sql_base: SQL_COUNT.with(|c| c.get()),
            slow_sql_base: SLOW_SQL_COUNT.with(|c| c.get()),
            _not_send: PhantomData,
        }
    }

    /// 自创建以来在当前线程执行的 SQL 条数
    pub fn sql_count(&self) -> u64 {
        SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_base)
    }

    fn slow_sql_count(&self) -> u64 {
        SLOW_SQL_COUNT
            .with(|c| c.get())
            .saturating_sub(self.slow_sql_base)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            sql_count = self.sql_count(),
            slow_sql_count = self.slow_sql_count(),
            "done"
        );

        ACTIVE_GUARDS.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// 在阻塞线程池上执行同步数据库操作，并在同一线程内统计耗时与 SQL 条数
///
/// # 参数
/// - op: 操作名（日志字段）
/// - work: 同步闭包（rusqlite 调用 + Mutex 锁都在其中完成）
///
/// # 返回
/// - Err(JoinError): 阻塞任务 panic 或被取消
pub async fn run_blocking<T, F>(op: &'static str, work: F) -> Result<T, tokio::task::JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let _perf = PerfGuard::new(op);
        work()
    })
    .await
}
