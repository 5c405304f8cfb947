//! Dashboard HTML template
//!
//! Contains the page structure:
//! - Welcome hero that fades out on scroll
//! - Bot status line with start/stop controls
//! - Balance and next-cycle cards
//! - Portfolio chart and holdings list
//! - Trade history feed

pub const TEMPLATE: &str = r#"
    <section id="welcome-section" class="hero">
        <div id="welcome-text" class="hero-text">
            <h1>🤖 Trading Bot</h1>
            <p>Scroll down to follow your portfolio in real time</p>
        </div>
    </section>

    <main id="dashboard-content" class="container content">
        <header class="section-reveal">
            <div>
                <h2>Dashboard</h2>
                <p class="status-line">Status: <span id="status-message">Loading...</span></p>
            </div>
            <div class="header-controls">
                <button class="btn btn-primary" id="start-bot-btn">▶ Start Bot</button>
                <button class="btn btn-secondary" id="stop-bot-btn">■ Stop Bot</button>
            </div>
        </header>

        <div class="grid">
            <div class="card section-reveal">
                <span class="card-title">💰 USDT Balance</span>
                <div class="card-value">$<span id="usdt-balance">--</span></div>
            </div>

            <div class="card section-reveal">
                <span class="card-title">⏱️ Next Cycle</span>
                <div class="card-value small" id="next-cycle-time">--</div>
            </div>

            <div class="card wide section-reveal">
                <span class="card-title">📊 Total Portfolio</span>
                <div class="chart-box">
                    <canvas id="portfolioChart"></canvas>
                </div>
            </div>

            <div class="card wide section-reveal">
                <span class="card-title">📈 Holdings</span>
                <div class="stack" id="portfolio-list"></div>
            </div>

            <div class="card wide section-reveal">
                <span class="card-title">🧾 Trade History</span>
                <div class="stack" id="history-list"></div>
            </div>
        </div>
    </main>
"#;
