//! Dashboard CSS styles
//!
//! Page layout plus the handful of utility classes used by the fragments the
//! renderer produces. Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #111827;
    --card: #1f2937;
    --card-inner: #374151;
    --border: #4b5563;
    --text: #e2e8f0;
    --text-dim: #9ca3af;
    --green: #4ade80;
    --green-soft: #86efac;
    --red: #f87171;
    --purple: #8b5cf6;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}

/* Hero */
.hero {
    height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    text-align: center;
    background: radial-gradient(circle at top, #312e81, var(--bg) 70%);
    transition: opacity 0.1s linear;
}

.hero-text h1 { font-size: 48px; font-weight: 700; }
.hero-text p { margin-top: 12px; color: var(--text-dim); }

/* Content */
.container { max-width: 1100px; margin: 0 auto; padding: 20px; }

.content {
    opacity: 0;
    transform: translateY(10px);
    transition: opacity 0.4s ease, transform 0.4s ease;
}

header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h2 { font-size: 24px; font-weight: 600; }
.status-line { margin-top: 4px; color: var(--text-dim); }

.header-controls { display: flex; gap: 12px; }

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}

.btn-primary { background: var(--purple); color: #fff; }
.btn-primary:hover { background: #7c3aed; }
.btn-secondary { background: var(--border); color: var(--text); }
.btn-secondary:hover { background: #6b7280; }

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 16px;
}

.wide { grid-column: 1 / -1; }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; margin-top: 8px; }
.card-value.small { font-size: 18px; }

.chart-box { position: relative; height: 280px; margin-top: 12px; }

.stack { display: flex; flex-direction: column; gap: 10px; margin-top: 12px; }

/* Fragment utilities */
.bg-gray-700 { background: var(--card-inner); }
.rounded-lg { border-radius: 8px; }
.p-3 { padding: 12px; }
.p-4 { padding: 16px; }
.shadow-md { box-shadow: 0 4px 6px rgba(0, 0, 0, 0.3); }
.flex { display: flex; }
.items-center { align-items: center; }
.justify-between { justify-content: space-between; }
.text-right { text-align: right; }
.text-center { text-align: center; }
.text-sm { font-size: 13px; }
.text-lg { font-size: 18px; }
.text-xl { font-size: 20px; }
.font-semibold { font-weight: 600; }
.font-bold { font-weight: 700; }
.text-gray-400 { color: var(--text-dim); }
.text-gray-500 { color: #6b7280; }
.text-green-300 { color: var(--green-soft); }
.text-green-400 { color: var(--green); }
.text-red-400 { color: var(--red); }

/* Scroll reveal */
.section-reveal {
    opacity: 0;
    transform: translateY(24px);
    transition: opacity 0.6s ease, transform 0.6s ease;
}

.section-reveal.revealed { opacity: 1; transform: translateY(0); }

/* Responsive */
@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr; }
    header { flex-direction: column; gap: 12px; }
    .hero-text h1 { font-size: 32px; }
}
";
