use crate::constants::{
    BOUNDARY_STROKE, GRATICULE_STROKE, LAND_STROKE, LINE_WIDTH, POINT_FILL, POINT_RADIUS,
    ROUTE_LINE_WIDTH, ROUTE_STROKE, SPHERE_FILL,
};
use crate::core::topology::Line;
use crate::core::ProjectionState;
use crate::dom::{self, js_err};
use crate::scene::Scene;
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Redraws the static scene through the current projection on a 2D canvas.
pub struct CanvasRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    scene: Scene,
    viewport: DVec2,
    dpr: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: web::HtmlCanvasElement, scene: Scene) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(js_err)?;
        Ok(Self {
            canvas,
            ctx,
            scene,
            viewport: DVec2::ZERO,
            dpr: 1.0,
        })
    }

    pub fn resize(&mut self, viewport: DVec2) {
        self.viewport = viewport;
        self.dpr = dom::sync_canvas_size(&self.canvas, viewport);
    }

    pub fn render(&self, projection: &ProjectionState) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(js_err)?;
        ctx.clear_rect(0.0, 0.0, self.viewport.x, self.viewport.y);

        ctx.begin_path();
        ctx.arc(
            projection.translation.x,
            projection.translation.y,
            projection.scale.max(0.0),
            0.0,
            TAU,
        )
        .map_err(js_err)?;
        ctx.set_fill_style_str(SPHERE_FILL);
        ctx.fill();

        self.stroke_lines(&self.scene.graticule, projection, GRATICULE_STROKE, LINE_WIDTH);
        self.stroke_lines(&self.scene.land, projection, LAND_STROKE, LINE_WIDTH);
        self.stroke_lines(&self.scene.borders, projection, BOUNDARY_STROKE, LINE_WIDTH);
        self.stroke_lines(&self.scene.routes, projection, ROUTE_STROKE, ROUTE_LINE_WIDTH);

        ctx.set_fill_style_str(POINT_FILL);
        for p in self.scene.points.iter().filter_map(|p| projection.project(*p)) {
            ctx.begin_path();
            ctx.arc(p.x, p.y, POINT_RADIUS, 0.0, TAU).map_err(js_err)?;
            ctx.fill();
        }
        Ok(())
    }

    // Lines are cut wherever they pass behind the horizon.
    fn stroke_lines(&self, lines: &[Line], projection: &ProjectionState, style: &str, width: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for line in lines {
            let mut pen_down = false;
            for point in line {
                match projection.project(*point) {
                    Some(p) if pen_down => ctx.line_to(p.x, p.y),
                    Some(p) => {
                        ctx.move_to(p.x, p.y);
                        pen_down = true;
                    }
                    None => pen_down = false,
                }
            }
        }
        ctx.set_stroke_style_str(style);
        ctx.set_line_width(width);
        ctx.stroke();
    }
}
