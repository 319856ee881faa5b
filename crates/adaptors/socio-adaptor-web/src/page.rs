//! Embedded chat page

/// Chat page HTML. `logs_enabled` makes the page follow `/logs`.
pub fn index_html(logs_enabled: bool) -> String {
    let logs_js = if logs_enabled {
        "const LOGS_ENABLED = true;"
    } else {
        "const LOGS_ENABLED = false;"
    };
    TEMPLATE.replace("{LOGS_JS}", logs_js)
}

const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>SocioAI</title>
<style>
  * { box-sizing: border-box; }
  body { margin: 0; font-family: system-ui, -apple-system, sans-serif; background: #0f1117; color: #e6e6e6; }
  header { display: flex; align-items: center; justify-content: space-between; padding: 14px 20px; border-bottom: 1px solid #23262f; }
  header h1 { font-size: 18px; margin: 0; }
  button { background: #2a2f3a; color: #e6e6e6; border: 1px solid #3a3f4b; border-radius: 6px; padding: 8px 14px; cursor: pointer; }
  button:disabled { opacity: .5; cursor: default; }
  #chat { max-width: 900px; margin: 0 auto; padding: 20px; display: flex; flex-direction: column; gap: 14px; min-height: calc(100vh - 140px); }
  .msg { padding: 12px 14px; border-radius: 10px; white-space: pre-wrap; line-height: 1.45; }
  .user { align-self: flex-end; background: #2d4b8a; max-width: 75%; }
  .assistant { align-self: flex-start; background: #1b1e27; border: 1px solid #23262f; max-width: 100%; }
  .error { align-self: flex-start; background: #4a1f24; }
  .kinds { display: flex; gap: 6px; margin-top: 10px; }
  .kinds button.active { background: #4ECDC4; color: #0f1117; }
  .legend { display: flex; gap: 12px; font-size: 12px; margin-top: 6px; }
  .legend span::before { content: ""; display: inline-block; width: 10px; height: 10px; margin-right: 4px; background: var(--c); }
  form { position: sticky; bottom: 0; display: flex; gap: 8px; max-width: 900px; margin: 0 auto; padding: 14px 20px; background: #0f1117; }
  input { flex: 1; padding: 10px; border-radius: 6px; border: 1px solid #3a3f4b; background: #1b1e27; color: #e6e6e6; }
  #logs { display: none; max-height: 160px; overflow: auto; font: 11px monospace; padding: 8px 20px; color: #8a8f9c; border-top: 1px solid #23262f; }
</style>
</head>
<body>
<header>
  <h1>SocioAI</h1>
  <button id="new-chat" type="button">New Chat</button>
</header>
<div id="chat"></div>
<form id="form">
  <input id="input" autocomplete="off" placeholder="Ask about post performance...">
  <button id="send" type="submit">Send</button>
</form>
<div id="logs"></div>
<script>
{LOGS_JS}
const KINDS = ["bar", "line", "radar", "area"];
const W = 560, H = 260, PAD = 36;
const chat = document.getElementById("chat");
const input = document.getElementById("input");
const send = document.getElementById("send");

function el(tag, cls, text) {
  const e = document.createElement(tag);
  if (cls) e.className = cls;
  if (text !== undefined) e.textContent = text;
  return e;
}

function svgEl(tag, attrs) {
  const e = document.createElementNS("http://www.w3.org/2000/svg", tag);
  for (const k in attrs) e.setAttribute(k, attrs[k]);
  return e;
}

function maxValue(chart) {
  let m = 0;
  for (const p of chart.points) for (const k of chart.metricHeaders) m = Math.max(m, p[k] || 0);
  return m || 1;
}

function drawCartesian(svg, chart, kind) {
  const max = maxValue(chart);
  const n = chart.points.length;
  const plotW = W - PAD * 2, plotH = H - PAD * 2;
  const y = v => H - PAD - (v / max) * plotH;
  svg.appendChild(svgEl("line", { x1: PAD, y1: H - PAD, x2: W - PAD, y2: H - PAD, stroke: "#555" }));
  chart.points.forEach((p, i) => {
    const t = svgEl("text", { x: PAD + plotW * (i + 0.5) / n, y: H - PAD + 16, fill: "#aaa", "font-size": 11, "text-anchor": "middle" });
    t.textContent = p.name;
    svg.appendChild(t);
  });
  const m = chart.metricHeaders.length;
  chart.metricHeaders.forEach((metric, j) => {
    const color = chart.colors[metric];
    if (kind === "bar") {
      const slot = plotW / n, bw = slot * 0.8 / m;
      chart.points.forEach((p, i) => {
        const v = p[metric] || 0;
        svg.appendChild(svgEl("rect", { x: PAD + slot * i + slot * 0.1 + bw * j, y: y(v), width: bw, height: H - PAD - y(v), fill: color }));
      });
      return;
    }
    const xs = chart.points.map((_, i) => PAD + plotW * (i + 0.5) / n);
    const pts = chart.points.map((p, i) => xs[i] + "," + y(p[metric] || 0));
    if (kind === "area") {
      const poly = [xs[0] + "," + (H - PAD)].concat(pts, [xs[n - 1] + "," + (H - PAD)]);
      svg.appendChild(svgEl("polygon", { points: poly.join(" "), fill: color, "fill-opacity": 0.35, stroke: color }));
    } else {
      svg.appendChild(svgEl("polyline", { points: pts.join(" "), fill: "none", stroke: color, "stroke-width": 2 }));
    }
  });
}

function drawRadar(svg, chart) {
  const max = maxValue(chart);
  const cx = W / 2, cy = H / 2, r = H / 2 - PAD;
  const n = chart.points.length;
  const at = (i, frac) => {
    const a = -Math.PI / 2 + 2 * Math.PI * i / n;
    return [cx + Math.cos(a) * r * frac, cy + Math.sin(a) * r * frac];
  };
  chart.points.forEach((p, i) => {
    const [x, y] = at(i, 1);
    svg.appendChild(svgEl("line", { x1: cx, y1: cy, x2: x, y2: y, stroke: "#444" }));
    const [lx, ly] = at(i, 1.12);
    const t = svgEl("text", { x: lx, y: ly, fill: "#aaa", "font-size": 11, "text-anchor": "middle" });
    t.textContent = p.name;
    svg.appendChild(t);
  });
  chart.metricHeaders.forEach(metric => {
    const color = chart.colors[metric];
    const pts = chart.points.map((p, i) => at(i, (p[metric] || 0) / max).join(","));
    svg.appendChild(svgEl("polygon", { points: pts.join(" "), fill: color, "fill-opacity": 0.3, stroke: color }));
  });
}

function renderChart(container, chart, kind) {
  container.innerHTML = "";
  const svg = svgEl("svg", { width: W, height: H, viewBox: "0 0 " + W + " " + H });
  if (kind === "radar") drawRadar(svg, chart); else drawCartesian(svg, chart, kind);
  container.appendChild(svg);
}

function addChart(parent, chart) {
  chart = Object.assign({}, chart, { metricHeaders: [...new Set(chart.metricHeaders)] });
  const holder = el("div");
  const kinds = el("div", "kinds");
  const legend = el("div", "legend");
  chart.metricHeaders.forEach(m => {
    const s = el("span", null, m);
    s.style.setProperty("--c", chart.colors[m]);
    legend.appendChild(s);
  });
  KINDS.forEach(kind => {
    const b = el("button", kind === "bar" ? "active" : "", kind);
    b.type = "button";
    b.onclick = () => {
      kinds.querySelectorAll("button").forEach(x => x.classList.remove("active"));
      b.classList.add("active");
      renderChart(holder, chart, kind);
    };
    kinds.appendChild(b);
  });
  parent.appendChild(kinds);
  parent.appendChild(holder);
  parent.appendChild(legend);
  renderChart(holder, chart, "bar");
}

function addMessage(role, text, data) {
  const div = el("div", "msg " + role, text);
  if (data && data.chart) addChart(div, data.chart);
  chat.appendChild(div);
  div.scrollIntoView({ behavior: "smooth" });
}

document.getElementById("form").addEventListener("submit", async e => {
  e.preventDefault();
  const message = input.value.trim();
  if (!message) return;
  input.value = "";
  addMessage("user", message);
  send.disabled = true;
  try {
    const res = await fetch("/api/chat", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ message })
    });
    const body = await res.json();
    if (!res.ok) throw new Error(body.error || "Request failed");
    addMessage("assistant", body.displayMessage || body.message, body.data);
  } catch (err) {
    addMessage("error", err.message);
  } finally {
    send.disabled = false;
    input.focus();
  }
});

document.getElementById("new-chat").onclick = () => {
  chat.innerHTML = "";
  input.value = "";
  input.focus();
};

if (LOGS_ENABLED) {
  const logs = document.getElementById("logs");
  logs.style.display = "block";
  const es = new EventSource("/logs");
  es.onmessage = ev => {
    try {
      const e = JSON.parse(ev.data);
      logs.appendChild(el("div", null, e.time + " " + e.level + " " + e.target + ": " + e.message));
      logs.scrollTop = logs.scrollHeight;
    } catch (_) {}
  };
}
</script>
</body>
</html>
"##;
