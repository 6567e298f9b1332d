pub fn render_index() -> String {
    INDEX_HTML.to_string()
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>EcoHabits</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f0f7f1;
      --bg-2: #cdeedd;
      --ink: #1f2d27;
      --accent: #10b981;
      --accent-dark: #0b8a61;
      --accent-2: #2f4858;
      --blue: #3b82f6;
      --card: rgba(255, 255, 255, 0.92);
      --line: rgba(47, 72, 88, 0.1);
      --muted: #6b7a72;
      --shadow: 0 24px 60px rgba(22, 63, 46, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e7f5ec 60%, #f4faf4 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    h1, h2, h3 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      font-family: inherit;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(16, 185, 129, 0.3);
    }

    .btn-ghost {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .btn-danger {
      background: transparent;
      color: #c63b2b;
      padding: 6px 10px;
    }

    input[type="text"], input[type="email"], input[type="password"] {
      width: 100%;
      padding: 10px 14px;
      border: 1px solid var(--line);
      border-radius: 12px;
      font-family: inherit;
      font-size: 0.95rem;
      background: white;
      color: var(--ink);
    }

    input:focus {
      outline: 2px solid var(--accent);
      border-color: transparent;
    }

    label {
      display: block;
      font-size: 0.85rem;
      font-weight: 600;
      margin-bottom: 6px;
    }

    .field {
      margin-bottom: 16px;
    }

    .status {
      position: fixed;
      top: 14px;
      left: 50%;
      transform: translateX(-50%);
      z-index: 60;
      font-size: 0.95rem;
      color: var(--muted);
      background: var(--card);
      border-radius: 999px;
      padding: 6px 18px;
      box-shadow: var(--shadow);
      min-height: 1.2em;
    }

    .status:empty {
      display: none;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .auth-wrap {
      min-height: 100vh;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .auth-card {
      width: min(420px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
    }

    .auth-card h1 {
      font-size: 2rem;
      margin-bottom: 4px;
    }

    .auth-card form {
      margin-top: 22px;
    }

    .auth-card .btn-primary {
      width: 100%;
      padding: 12px;
      margin-top: 4px;
    }

    .auth-switch {
      margin: 18px 0 0;
      font-size: 0.9rem;
      color: var(--muted);
      text-align: center;
    }

    .auth-switch a {
      color: var(--accent-dark);
      font-weight: 600;
      text-decoration: none;
    }

    .banner {
      border-radius: 12px;
      padding: 10px 14px;
      font-size: 0.9rem;
      margin-bottom: 14px;
      background: #fdecea;
      color: #c63b2b;
      border: 1px solid rgba(198, 59, 43, 0.25);
    }

    .shell {
      display: grid;
      grid-template-columns: 230px 1fr;
      min-height: 100vh;
    }

    .sidebar {
      background: var(--card);
      border-right: 1px solid var(--line);
      padding: 28px 18px;
      display: flex;
      flex-direction: column;
      gap: 24px;
      position: sticky;
      top: 0;
      height: 100vh;
    }

    .logo {
      font-family: "Fraunces", "Georgia", serif;
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-dark);
    }

    .nav {
      display: grid;
      gap: 6px;
    }

    .nav a {
      display: block;
      padding: 10px 14px;
      border-radius: 12px;
      text-decoration: none;
      color: var(--accent-2);
      font-weight: 500;
    }

    .nav a.active {
      background: var(--accent);
      color: white;
    }

    .sidebar-footer {
      margin-top: auto;
      display: grid;
      gap: 12px;
    }

    .whoami {
      display: flex;
      align-items: center;
      gap: 10px;
      font-size: 0.9rem;
    }

    .avatar {
      width: 38px;
      height: 38px;
      border-radius: 50%;
      background: var(--accent);
      color: white;
      display: grid;
      place-items: center;
      font-weight: 600;
      flex-shrink: 0;
    }

    .content {
      padding: 32px;
      display: grid;
      gap: 24px;
      align-content: start;
      max-width: 1080px;
      width: 100%;
      margin: 0 auto;
    }

    .card {
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 20px;
      border: 1px solid var(--line);
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .page {
      display: grid;
      gap: 20px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid var(--line);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.green {
      color: var(--accent-dark);
    }

    .card-head {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 14px;
      margin-bottom: 14px;
    }

    .habit-list {
      display: grid;
    }

    .habit-row {
      display: flex;
      align-items: center;
      gap: 14px;
      padding: 14px 4px;
      border-top: 1px solid var(--line);
    }

    .habit-row:first-child {
      border-top: none;
    }

    .habit-toggle {
      width: 30px;
      height: 30px;
      border-radius: 50%;
      border: 2px solid rgba(47, 72, 88, 0.3);
      background: white;
      color: white;
      display: grid;
      place-items: center;
      font-size: 0.9rem;
      padding: 0;
      flex-shrink: 0;
    }

    .habit-toggle.done {
      background: var(--accent);
      border-color: var(--accent);
    }

    .habit-name {
      font-weight: 600;
    }

    .habit-row.done .habit-name {
      color: var(--muted);
      text-decoration: line-through;
    }

    .habit-meta {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .habit-meta .dot {
      display: inline-block;
      width: 8px;
      height: 8px;
      border-radius: 50%;
      margin-right: 6px;
      background: var(--blue);
    }

    .habit-meta .dot.daily {
      background: var(--accent);
    }

    .habit-actions {
      margin-left: auto;
      display: flex;
      align-items: center;
      gap: 6px;
    }

    .pill {
      font-size: 0.75rem;
      background: rgba(59, 130, 246, 0.12);
      color: #1d4ed8;
      padding: 4px 10px;
      border-radius: 999px;
      font-weight: 600;
    }

    .empty {
      text-align: center;
      padding: 36px 12px;
      color: var(--muted);
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: var(--muted);
      box-shadow: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    #chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-axis {
      stroke: rgba(47, 72, 88, 0.25);
      stroke-dasharray: 4 6;
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .bars {
      display: grid;
      gap: 12px;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 70px 1fr 48px;
      align-items: center;
      gap: 12px;
      font-size: 0.9rem;
    }

    .bar-track {
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      height: 12px;
      overflow: hidden;
    }

    .bar-fill {
      height: 100%;
      border-radius: 999px;
      background: var(--accent);
    }

    .bar-fill.blue {
      background: var(--blue);
    }

    .modal-backdrop {
      position: fixed;
      inset: 0;
      background: rgba(31, 45, 39, 0.5);
      display: grid;
      place-items: center;
      z-index: 50;
      padding: 18px;
    }

    .modal {
      width: min(440px, 100%);
      background: white;
      border-radius: 20px;
      padding: 26px;
      box-shadow: var(--shadow);
    }

    .modal h3 {
      margin-bottom: 18px;
    }

    .radio-row {
      display: flex;
      gap: 18px;
      font-size: 0.95rem;
    }

    .radio-row label, .check-row label {
      display: inline-flex;
      align-items: center;
      gap: 6px;
      font-weight: 500;
      margin: 0;
    }

    .modal-actions {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
      margin-top: 22px;
    }

    .profile-head {
      display: flex;
      align-items: center;
      gap: 20px;
    }

    .profile-head .avatar {
      width: 72px;
      height: 72px;
      font-size: 1.6rem;
    }

    .kv {
      display: grid;
      grid-template-columns: 160px 1fr;
      gap: 8px 16px;
      font-size: 0.95rem;
      margin-top: 18px;
    }

    .kv dt {
      color: var(--muted);
    }

    .kv dd {
      margin: 0;
      font-weight: 600;
    }

    @media (max-width: 760px) {
      .shell {
        grid-template-columns: 1fr;
      }
      .sidebar {
        position: static;
        height: auto;
        flex-direction: row;
        flex-wrap: wrap;
        align-items: center;
      }
      .sidebar-footer {
        margin-top: 0;
      }
      .content {
        padding: 18px;
      }
    }
  </style>
</head>
<body>
  <div class="status" id="status"></div>

  <main class="auth-wrap" id="auth-view" hidden>
    <div class="auth-card">
      <h1>EcoHabits</h1>
      <p class="subtitle" id="auth-subtitle">Small green habits, kept daily.</p>
      <div class="banner" id="auth-error" hidden></div>

      <form id="login-form">
        <div class="field">
          <label for="login-email">Email</label>
          <input type="email" id="login-email" required autocomplete="email" placeholder="you@example.com" />
        </div>
        <div class="field">
          <label for="login-password">Password</label>
          <input type="password" id="login-password" required autocomplete="current-password" />
        </div>
        <button class="btn-primary" type="submit">Log in</button>
      </form>

      <form id="signup-form" hidden>
        <div class="field">
          <label for="signup-name">Full name</label>
          <input type="text" id="signup-name" required placeholder="Ada Lovelace" />
        </div>
        <div class="field">
          <label for="signup-email">Email</label>
          <input type="email" id="signup-email" required autocomplete="email" />
        </div>
        <div class="field">
          <label for="signup-password">Password</label>
          <input type="password" id="signup-password" required autocomplete="new-password" />
        </div>
        <div class="field">
          <label for="signup-confirm">Confirm password</label>
          <input type="password" id="signup-confirm" required autocomplete="new-password" />
        </div>
        <button class="btn-primary" type="submit">Create account</button>
      </form>

      <p class="auth-switch" id="auth-switch"></p>
    </div>
  </main>

  <div class="shell" id="app-view" hidden>
    <aside class="sidebar">
      <div class="logo">EcoHabits</div>
      <nav class="nav" id="nav">
        <a href="#/" data-route="dashboard">Dashboard</a>
        <a href="#/habits" data-route="habits">My Habits</a>
        <a href="#/progress" data-route="progress">Progress</a>
        <a href="#/profile" data-route="profile">Profile</a>
      </nav>
      <div class="sidebar-footer">
        <div class="whoami">
          <span class="avatar" id="nav-avatar">?</span>
          <span id="nav-name"></span>
        </div>
        <button class="btn-ghost" id="signout-btn" type="button">Sign out</button>
      </div>
    </aside>

    <div class="content">
      <section class="page" id="page-dashboard" hidden>
        <div class="card">
          <h2 id="welcome-title">Welcome back!</h2>
          <p class="subtitle">Track your eco-friendly habits and make a positive impact.</p>
        </div>
        <div class="panel">
          <div class="stat">
            <span class="label">Completed today</span>
            <span class="value green" id="stat-completed">0</span>
          </div>
          <div class="stat">
            <span class="label">Total habits</span>
            <span class="value" id="stat-total">0</span>
          </div>
          <div class="stat">
            <span class="label">Consistency</span>
            <span class="value" id="stat-rate">0%</span>
          </div>
        </div>
        <div class="card">
          <div class="card-head">
            <div>
              <h3>Today's habits</h3>
              <p class="subtitle" id="today-line"></p>
            </div>
            <button class="btn-primary" id="add-habit-btn" type="button">Add habit</button>
          </div>
          <div class="habit-list" id="dashboard-habits"></div>
        </div>
      </section>

      <section class="page" id="page-habits" hidden>
        <div class="card">
          <div class="card-head">
            <div>
              <h2>My Habits</h2>
              <p class="subtitle">Everything you are tracking, daily and weekly.</p>
            </div>
            <div class="tabs" id="habit-filter" role="tablist">
              <button class="tab active" type="button" data-filter="all">All</button>
              <button class="tab" type="button" data-filter="daily">Daily</button>
              <button class="tab" type="button" data-filter="weekly">Weekly</button>
            </div>
          </div>
          <div class="habit-list" id="all-habits"></div>
        </div>
      </section>

      <section class="page" id="page-progress" hidden>
        <div class="panel">
          <div class="stat">
            <span class="label">Current streak</span>
            <span class="value green" id="p-current-streak">0</span>
          </div>
          <div class="stat">
            <span class="label">Best streak</span>
            <span class="value" id="p-best-streak">0</span>
          </div>
          <div class="stat">
            <span class="label">All-time completions</span>
            <span class="value" id="p-total-completed">0</span>
          </div>
          <div class="stat">
            <span class="label">Consistency</span>
            <span class="value" id="p-rate">0%</span>
          </div>
        </div>
        <div class="card">
          <div class="card-head">
            <div>
              <h3 id="chart-title">This week</h3>
              <p class="subtitle" id="chart-subtitle">Completions per day.</p>
            </div>
            <div class="tabs" id="range-tabs" role="tablist">
              <button class="tab active" type="button" data-range="week" role="tab" aria-selected="true">Week</button>
              <button class="tab" type="button" data-range="month" role="tab" aria-selected="false">Month</button>
              <button class="tab" type="button" data-range="year" role="tab" aria-selected="false">Year</button>
            </div>
          </div>
          <svg id="chart" viewBox="0 0 600 260" aria-label="Completions chart" role="img"></svg>
        </div>
        <div class="card">
          <h3>Last four weeks</h3>
          <p class="subtitle">Share of the weekly daily-habit target reached.</p>
          <div class="bars" id="weekly-bars" style="margin-top: 14px;"></div>
        </div>
        <div class="card">
          <h3>Habit distribution</h3>
          <div class="bars" id="distribution" style="margin-top: 14px;"></div>
        </div>
      </section>

      <section class="page" id="page-profile" hidden>
        <div class="card">
          <div class="profile-head">
            <span class="avatar" id="profile-avatar">?</span>
            <div>
              <h2 id="profile-name"></h2>
              <p class="subtitle" id="profile-email"></p>
            </div>
            <div class="habit-actions">
              <button class="btn-ghost" id="edit-profile-btn" type="button">Edit name</button>
            </div>
          </div>
          <form id="profile-form" hidden style="margin-top: 18px;">
            <div class="field">
              <label for="profile-input">Full name</label>
              <input type="text" id="profile-input" required />
            </div>
            <div class="modal-actions">
              <button class="btn-ghost" type="button" id="profile-cancel">Cancel</button>
              <button class="btn-primary" type="submit">Save</button>
            </div>
          </form>
          <dl class="kv">
            <dt>Sustainability score</dt>
            <dd id="profile-score">0</dd>
            <dt>Member since</dt>
            <dd id="profile-since"></dd>
          </dl>
        </div>
      </section>
    </div>
  </div>

  <div class="modal-backdrop" id="habit-modal" hidden>
    <div class="modal">
      <h3 id="modal-title">Add new habit</h3>
      <form id="habit-form">
        <div class="field">
          <label for="habit-name">Habit name</label>
          <input type="text" id="habit-name" required placeholder="e.g. Use reusable bags for shopping" />
        </div>
        <div class="field">
          <label>Frequency</label>
          <div class="radio-row">
            <label><input type="radio" name="frequency" value="daily" checked /> Daily</label>
            <label><input type="radio" name="frequency" value="weekly" /> Weekly</label>
          </div>
        </div>
        <div class="field check-row">
          <label><input type="checkbox" id="habit-reminder" /> Enable reminder</label>
        </div>
        <div class="modal-actions">
          <button class="btn-ghost" type="button" id="modal-cancel">Cancel</button>
          <button class="btn-primary" type="submit">Save habit</button>
        </div>
      </form>
    </div>
  </div>

  <script>
    const TOKEN_KEY = 'ecohabits_token';
    const statusEl = document.getElementById('status');
    const authView = document.getElementById('auth-view');
    const appView = document.getElementById('app-view');

    let session = null;
    let habits = [];
    let stats = null;
    let progress = null;
    let habitFilter = 'all';
    let activeRange = 'week';
    let editingHabitId = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (message) {
        clearTimeout(setStatus.timer);
        setStatus.timer = setTimeout(() => setStatus('', ''), 2400);
      }
    };

    const clearSession = () => {
      localStorage.removeItem(TOKEN_KEY);
      session = null;
      habits = [];
      stats = null;
      progress = null;
    };

    const api = async (path, options = {}) => {
      const headers = Object.assign({}, options.headers);
      if (options.body) {
        headers['content-type'] = 'application/json';
      }
      const token = localStorage.getItem(TOKEN_KEY);
      if (token) {
        headers['authorization'] = `Bearer ${token}`;
      }
      const res = await fetch(path, Object.assign({}, options, { headers }));
      if (res.status === 401) {
        clearSession();
        route();
        throw new Error('Please log in again');
      }
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const escapeHtml = (value) =>
      String(value).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;',
        '<': '&lt;',
        '>': '&gt;',
        '"': '&quot;',
        "'": '&#39;'
      })[ch]);

    // --- auth screens -----------------------------------------------------

    const loginForm = document.getElementById('login-form');
    const signupForm = document.getElementById('signup-form');
    const authError = document.getElementById('auth-error');
    const authSwitch = document.getElementById('auth-switch');

    const showAuthError = (message) => {
      authError.textContent = message;
      authError.hidden = !message;
    };

    const showAuth = (mode) => {
      authView.hidden = false;
      appView.hidden = true;
      showAuthError('');
      const signup = mode === 'signup';
      loginForm.hidden = signup;
      signupForm.hidden = !signup;
      document.getElementById('auth-subtitle').textContent = signup
        ? 'Create your account'
        : 'Small green habits, kept daily.';
      authSwitch.innerHTML = signup
        ? 'Already have an account? <a href="#/login">Log in</a>'
        : 'New here? <a href="#/signup">Create an account</a>';
    };

    loginForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      showAuthError('');
      try {
        const body = JSON.stringify({
          email: document.getElementById('login-email').value,
          password: document.getElementById('login-password').value
        });
        const result = await api('/api/auth/login', { method: 'POST', body });
        localStorage.setItem(TOKEN_KEY, result.access_token);
        session = { user: result.user, profile: result.profile };
        location.hash = '#/';
        route();
      } catch (err) {
        showAuthError(err.message);
      }
    });

    signupForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      showAuthError('');
      const password = document.getElementById('signup-password').value;
      if (password !== document.getElementById('signup-confirm').value) {
        showAuthError('Passwords do not match');
        return;
      }
      try {
        const body = JSON.stringify({
          full_name: document.getElementById('signup-name').value,
          email: document.getElementById('signup-email').value,
          password
        });
        await api('/api/auth/signup', { method: 'POST', body });
        setStatus('Account created, please log in', 'ok');
        location.hash = '#/login';
      } catch (err) {
        showAuthError(err.message);
      }
    });

    document.getElementById('signout-btn').addEventListener('click', async () => {
      try {
        await api('/api/auth/logout', { method: 'POST' });
      } catch (err) {
        // the local session goes away either way
      }
      clearSession();
      location.hash = '#/login';
      route();
    });

    // --- habits -----------------------------------------------------------

    const frequencyLine = (habit) => {
      const reset = habit.frequency === 'daily' ? 'tomorrow' : 'next week';
      const dotClass = habit.frequency === 'daily' ? 'dot daily' : 'dot';
      return `<span class="${dotClass}"></span>${habit.frequency} &middot; resets ${reset}`;
    };

    const habitRow = (habit, withActions) => {
      const actions = withActions
        ? `<div class="habit-actions">
             ${habit.reminder_enabled ? '<span class="pill">Reminder on</span>' : ''}
             <button class="btn-ghost" type="button" data-edit="${habit.id}">Edit</button>
             <button class="btn-danger" type="button" data-delete="${habit.id}">Delete</button>
           </div>`
        : habit.reminder_enabled
          ? '<div class="habit-actions"><span class="pill">Reminder on</span></div>'
          : '';
      return `<div class="habit-row ${habit.completed ? 'done' : ''}">
        <button class="habit-toggle ${habit.completed ? 'done' : ''}" type="button"
          data-toggle="${habit.id}" aria-pressed="${habit.completed}">${habit.completed ? '&#10003;' : ''}</button>
        <div>
          <div class="habit-name">${escapeHtml(habit.name)}</div>
          <div class="habit-meta">${frequencyLine(habit)}</div>
        </div>
        ${actions}
      </div>`;
    };

    const emptyState = `<div class="empty">
      <p><strong>No habits yet</strong></p>
      <p>Start building your eco-friendly routine by creating your first habit.</p>
    </div>`;

    const renderHabits = () => {
      const dashboard = document.getElementById('dashboard-habits');
      dashboard.innerHTML = habits.length
        ? habits.map((habit) => habitRow(habit, false)).join('')
        : emptyState;

      const filtered = habits.filter(
        (habit) => habitFilter === 'all' || habit.frequency === habitFilter
      );
      const all = document.getElementById('all-habits');
      all.innerHTML = filtered.length
        ? filtered.map((habit) => habitRow(habit, true)).join('')
        : emptyState;
    };

    const renderStats = () => {
      if (!stats) return;
      document.getElementById('stat-completed').textContent = stats.completed_today;
      document.getElementById('stat-total').textContent = stats.total_habits;
      document.getElementById('stat-rate').textContent = `${stats.completion_rate}%`;
    };

    const refreshHabits = async () => {
      habits = await api('/api/habits');
      renderHabits();
    };

    const refreshStats = async () => {
      stats = await api('/api/stats');
      renderStats();
    };

    const toggleHabit = async (id) => {
      const habit = habits.find((h) => h.id === id);
      if (!habit) return;
      const previous = habit.completed;
      habit.completed = !previous;
      renderHabits();
      try {
        const result = await api(`/api/habits/${id}/toggle`, { method: 'POST' });
        habit.completed = result.completed;
      } catch (err) {
        habit.completed = previous;
        setStatus(err.message, 'error');
      }
      renderHabits();
      refreshStats().catch(() => {});
    };

    const deleteHabit = async (id) => {
      try {
        await api(`/api/habits/${id}`, { method: 'DELETE' });
        habits = habits.filter((h) => h.id !== id);
        renderHabits();
        refreshStats().catch(() => {});
        setStatus('Habit deleted', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    document.addEventListener('click', (event) => {
      const toggle = event.target.closest('[data-toggle]');
      if (toggle) {
        toggleHabit(toggle.dataset.toggle);
        return;
      }
      const edit = event.target.closest('[data-edit]');
      if (edit) {
        openHabitModal(edit.dataset.edit);
        return;
      }
      const del = event.target.closest('[data-delete]');
      if (del) {
        deleteHabit(del.dataset.delete);
      }
    });

    document.getElementById('habit-filter').addEventListener('click', (event) => {
      const tab = event.target.closest('[data-filter]');
      if (!tab) return;
      habitFilter = tab.dataset.filter;
      document
        .querySelectorAll('#habit-filter .tab')
        .forEach((button) => button.classList.toggle('active', button === tab));
      renderHabits();
    });

    // --- add / edit modal -------------------------------------------------

    const habitModal = document.getElementById('habit-modal');
    const habitForm = document.getElementById('habit-form');

    const openHabitModal = (id) => {
      editingHabitId = id || null;
      const habit = id ? habits.find((h) => h.id === id) : null;
      document.getElementById('modal-title').textContent = habit ? 'Edit habit' : 'Add new habit';
      document.getElementById('habit-name').value = habit ? habit.name : '';
      document.getElementById('habit-reminder').checked = habit ? habit.reminder_enabled : false;
      const frequency = habit ? habit.frequency : 'daily';
      habitForm.querySelectorAll('input[name="frequency"]').forEach((radio) => {
        radio.checked = radio.value === frequency;
      });
      habitModal.hidden = false;
      document.getElementById('habit-name').focus();
    };

    const closeHabitModal = () => {
      habitModal.hidden = true;
      editingHabitId = null;
    };

    document.getElementById('add-habit-btn').addEventListener('click', () => openHabitModal());
    document.getElementById('modal-cancel').addEventListener('click', closeHabitModal);
    habitModal.addEventListener('click', (event) => {
      if (event.target === habitModal) closeHabitModal();
    });

    habitForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      const body = JSON.stringify({
        name: document.getElementById('habit-name').value,
        frequency: habitForm.querySelector('input[name="frequency"]:checked').value,
        reminder_enabled: document.getElementById('habit-reminder').checked
      });
      try {
        if (editingHabitId) {
          await api(`/api/habits/${editingHabitId}`, { method: 'PUT', body });
        } else {
          await api('/api/habits', { method: 'POST', body });
        }
        closeHabitModal();
        await refreshHabits();
        refreshStats().catch(() => {});
        setStatus('Saved', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    // --- progress charts --------------------------------------------------

    const chartEl = document.getElementById('chart');

    const renderLineChart = (points) => {
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const width = 600;
      const height = 260;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      const values = points.map((point) => point.value);
      let min = Math.min(...values, 0);
      let max = Math.max(...values, 0);
      if (min === max) {
        min -= 1;
        max += 1;
      }

      const range = max - min;
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value - min) * scaleY;

      const path = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.value).toFixed(2)}`)
        .join(' ');

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        const rounded = Math.round(value * 10) / 10;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${Number.isInteger(rounded) ? rounded : rounded.toFixed(1)}</text>`;
      }

      const labelEvery = points.length > 12 ? 5 : points.length > 8 ? 2 : 1;
      const xLabels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${point.label}</text>`;
        })
        .join('');

      const circles = points
        .map((point, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(point.value)}" r="4" />`)
        .join('');

      const zeroLine = `<line class="chart-axis" x1="${paddingX}" y1="${y(0)}" x2="${width - paddingX}" y2="${y(0)}" />`;

      chartEl.innerHTML = `
        ${grid}
        ${zeroLine}
        <path class="chart-line" d="${path}" />
        ${circles}
        ${xLabels}
      `;
    };

    const rangeMeta = {
      week: { title: 'This week', subtitle: 'Completions per day.' },
      month: { title: 'Last 30 days', subtitle: 'Completions per day.' },
      year: { title: 'This year', subtitle: 'Completions per month.' }
    };

    const renderProgress = () => {
      if (!progress) return;
      const s = progress.stats;
      document.getElementById('p-current-streak').textContent = s.current_streak;
      document.getElementById('p-best-streak').textContent = s.best_streak;
      document.getElementById('p-total-completed').textContent = s.total_completed;
      document.getElementById('p-rate').textContent = `${s.completion_rate}%`;

      const series = progress[activeRange] || [];
      document.getElementById('chart-title').textContent = rangeMeta[activeRange].title;
      document.getElementById('chart-subtitle').textContent = rangeMeta[activeRange].subtitle;
      renderLineChart(series.map((point) => ({ label: point.label, value: point.completions })));

      const bars = document.getElementById('weekly-bars');
      bars.innerHTML = progress.monthly
        .map(
          (bucket) => `<div class="bar-row">
            <span>${bucket.week}</span>
            <div class="bar-track"><div class="bar-fill" style="width: ${bucket.completed}%;"></div></div>
            <span>${bucket.completed}%</span>
          </div>`
        )
        .join('');

      const total = progress.distribution.reduce((acc, slice) => acc + slice.value, 0);
      const distribution = document.getElementById('distribution');
      distribution.innerHTML = total
        ? progress.distribution
            .map((slice) => {
              const share = Math.round((100 * slice.value) / total);
              const color = slice.name === 'Daily' ? '' : ' blue';
              return `<div class="bar-row">
                <span>${slice.name}</span>
                <div class="bar-track"><div class="bar-fill${color}" style="width: ${share}%;"></div></div>
                <span>${slice.value}</span>
              </div>`;
            })
            .join('')
        : '<div class="empty">No habits yet.</div>';
    };

    const refreshProgress = async () => {
      progress = await api('/api/progress');
      renderProgress();
    };

    document.getElementById('range-tabs').addEventListener('click', (event) => {
      const tab = event.target.closest('[data-range]');
      if (!tab) return;
      activeRange = tab.dataset.range;
      document.querySelectorAll('#range-tabs .tab').forEach((button) => {
        const isActive = button === tab;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
      renderProgress();
    });

    // --- profile ----------------------------------------------------------

    const profileForm = document.getElementById('profile-form');

    const renderSessionChrome = () => {
      if (!session) return;
      const profile = session.profile;
      const name = profile ? profile.full_name : session.user.email.split('@')[0];
      const initials = profile && profile.avatar_initials
        ? profile.avatar_initials
        : session.user.email[0].toUpperCase();
      document.getElementById('nav-avatar').textContent = initials;
      document.getElementById('nav-name').textContent = name;
      document.getElementById('welcome-title').textContent = `Welcome back, ${name}!`;
      document.getElementById('today-line').textContent = new Date().toLocaleDateString('en-US', {
        weekday: 'long',
        month: 'long',
        day: 'numeric'
      });

      document.getElementById('profile-avatar').textContent = initials;
      document.getElementById('profile-name').textContent = profile ? profile.full_name : 'No name set';
      document.getElementById('profile-email').textContent = session.user.email;
      document.getElementById('profile-score').textContent = profile ? profile.sustainability_score : 0;
      document.getElementById('profile-since').textContent = profile
        ? new Date(profile.created_at).toLocaleDateString('en-US', { year: 'numeric', month: 'long' })
        : '';
    };

    document.getElementById('edit-profile-btn').addEventListener('click', () => {
      document.getElementById('profile-input').value = session && session.profile ? session.profile.full_name : '';
      profileForm.hidden = false;
    });

    document.getElementById('profile-cancel').addEventListener('click', () => {
      profileForm.hidden = true;
    });

    profileForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        const body = JSON.stringify({ full_name: document.getElementById('profile-input').value });
        const profile = await api('/api/profile', { method: 'PUT', body });
        session.profile = profile;
        profileForm.hidden = true;
        renderSessionChrome();
        setStatus('Profile updated', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    // --- routing & refresh ------------------------------------------------

    const pages = ['dashboard', 'habits', 'progress', 'profile'];

    const currentRoute = () => {
      const hash = location.hash || '#/';
      if (hash === '#/login' || hash === '#/signup') return hash.slice(2);
      if (hash === '#/habits') return 'habits';
      if (hash === '#/progress') return 'progress';
      if (hash === '#/profile') return 'profile';
      return 'dashboard';
    };

    const refreshForRoute = (name) => {
      const jobs = [refreshHabits(), refreshStats()];
      if (name === 'progress') {
        jobs.push(refreshProgress());
      }
      return Promise.all(jobs);
    };

    const route = () => {
      const name = currentRoute();

      if (!localStorage.getItem(TOKEN_KEY)) {
        showAuth(name === 'signup' ? 'signup' : 'login');
        return;
      }
      if (name === 'login' || name === 'signup') {
        location.hash = '#/';
        return;
      }

      authView.hidden = true;
      appView.hidden = false;
      pages.forEach((page) => {
        document.getElementById(`page-${page}`).hidden = page !== name;
      });
      document.querySelectorAll('#nav a').forEach((link) => {
        link.classList.toggle('active', link.dataset.route === name);
      });

      const boot = session
        ? Promise.resolve()
        : api('/api/auth/session').then((result) => {
            session = result;
          });
      boot
        .then(() => {
          renderSessionChrome();
          return refreshForRoute(name);
        })
        .catch((err) => setStatus(err.message, 'error'));
    };

    window.addEventListener('hashchange', route);

    // Overlapping refreshes are fine: the last response to land wins.
    setInterval(() => {
      if (session && !appView.hidden) {
        refreshForRoute(currentRoute()).catch(() => {});
      }
    }, 10000);

    document.addEventListener('visibilitychange', () => {
      if (document.visibilityState === 'visible' && session && !appView.hidden) {
        refreshForRoute(currentRoute()).catch(() => {});
      }
    });

    route();
  </script>
</body>
</html>
"##;
