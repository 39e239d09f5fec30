use crate::ui::UiState;
use crate::view::MapView;
use clipboard::ClipboardContext;
use clipboard::ClipboardProvider;
use egui::{ColorImage, Context, TextureHandle, TextureOptions, Ui};
use egui_extras::{Column, TableBuilder};
use std::path::PathBuf;
use treasure_map::{export, Pixel, TreasureMap};

pub struct TreasureMapApp {
    treasure_map: TreasureMap,
    view: MapView,
    ui_state: UiState,
    texture: Option<TextureHandle>,
    clipboard: Option<ClipboardContext>,
}

impl TreasureMapApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        treasure_map: TreasureMap,
        player_position: Pixel,
        output_dir: PathBuf,
    ) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        cc.egui_ctx.set_style(style);

        let clipboard = ClipboardProvider::new().ok();

        Self {
            view: MapView::new(treasure_map.size()),
            treasure_map,
            ui_state: UiState::new(player_position, output_dir),
            texture: None,
            clipboard,
        }
    }

    pub fn copy_to_clipboard(&mut self, text: String) -> bool {
        if let Some(clipboard) = &mut self.clipboard {
            clipboard.set_contents(text).is_ok()
        } else {
            false
        }
    }

    // Re-render only when the player moved or a flag changed. A failed
    // render keeps the previous frame on screen.
    fn update_frame(&mut self, ctx: &Context) {
        if !self.ui_state.needs_render {
            return;
        }
        self.ui_state.needs_render = false;

        let frame = match self
            .treasure_map
            .render(self.ui_state.player_position, self.ui_state.show_player_icon)
        {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("Failed to render treasure map: {}", err);
                self.ui_state.status = Some(format!("Render failed: {err}"));
                return;
            }
        };

        let image = ColorImage::from_rgb(
            [frame.width() as usize, frame.height() as usize],
            frame.as_raw(),
        );
        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("treasure_map", image, TextureOptions::LINEAR));
        }
    }

    // Exports never show the player marker.
    fn export(&mut self) {
        let result = self
            .treasure_map
            .render(self.ui_state.player_position, false)
            .and_then(|frame| export::save_frame(&frame, &self.ui_state.output_dir));

        self.ui_state.status = Some(match result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("Failed to export treasure map: {}", err);
                format!("Export failed: {err}")
            }
        });
    }

    fn set_player_position(&mut self, position: Pixel) {
        if position != self.ui_state.player_position {
            self.ui_state.player_position = position;
            self.ui_state.needs_render = true;
        }
    }

    // One row per icon, in paint order
    fn draw_icon_table(&mut self, ui: &mut Ui) {
        let positions = self
            .treasure_map
            .icon_positions(self.ui_state.player_position)
            .ok();
        let mut toggled: Option<(usize, bool)> = None;

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Show");
                });
                header.col(|ui| {
                    ui.strong("Icon");
                });
                header.col(|ui| {
                    ui.strong("On map");
                });
            })
            .body(|mut body| {
                for (index, icon) in self.treasure_map.icons().iter().enumerate() {
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            let mut show = icon.show_true_position();
                            if ui
                                .checkbox(&mut show, "")
                                .on_hover_text("Show the true position")
                                .changed()
                            {
                                toggled = Some((index, show));
                            }
                        });
                        row.col(|ui| {
                            ui.label(icon.name());
                        });
                        row.col(|ui| {
                            match positions.as_ref().and_then(|positions| positions.get(index)) {
                                Some(position) => ui.label(format!("({}, {})", position.x, position.y)),
                                None => ui.label("-"),
                            };
                        });
                    });
                }
            });

        if let Some((index, show)) = toggled {
            match self.treasure_map.set_show_true_position(index, show) {
                Ok(()) => self.ui_state.needs_render = true,
                Err(err) => self.ui_state.status = Some(err.to_string()),
            }
        }
    }

    fn draw_map(&mut self, ui: &mut Ui) {
        self.view.fit(ui.available_size());

        let Some(texture) = &self.texture else {
            ui.spinner();
            return;
        };

        let response = ui.add(
            egui::Image::new(texture.id(), self.view.display_size())
                .sense(egui::Sense::click_and_drag()),
        );

        if response.is_pointer_button_down_on() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let position = self.view.screen_to_map(pointer, response.rect);
                self.set_player_position(position);
            }
        }
    }
}

impl eframe::App for TreasureMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.update_frame(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Treasure Map");
                ui.separator();
                ui.label("Zoom:");
                let zoom_percentage = (self.view.get_zoom() * 100.0) as i32;
                ui.label(format!("{}%", zoom_percentage));
            });
        });

        egui::SidePanel::right("settings_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Player");
                    if ui
                        .checkbox(&mut self.ui_state.show_player_icon, "Show player")
                        .changed()
                    {
                        self.ui_state.needs_render = true;
                    }

                    ui.horizontal(|ui| {
                        let position = self.ui_state.player_position;
                        let coords_text = format!("({}, {})", position.x, position.y);
                        ui.label(coords_text.clone());
                        if ui.button("Copy position").clicked() {
                            self.copy_to_clipboard(coords_text);
                        }
                    });

                    ui.separator();

                    ui.heading("Hidden Locations");
                    self.draw_icon_table(ui);

                    ui.separator();

                    ui.heading("Export");
                    ui.label(format!("Folder: {}", self.ui_state.output_dir.display()));
                    ui.horizontal(|ui| {
                        if ui.button("Export").clicked() {
                            self.export();
                        }
                        if ui.button("Choose folder…").clicked() {
                            if let Some(dir) = rfd::FileDialog::new()
                                .set_directory(&self.ui_state.output_dir)
                                .pick_folder()
                            {
                                self.ui_state.output_dir = dir;
                            }
                        }
                    });

                    if let Some(status) = &self.ui_state.status {
                        ui.label(status.as_str());
                    }

                    ui.separator();

                    ui.collapsing("Help", |ui| {
                        ui.label("• Click or drag on the map to move the player");
                        ui.label("• Tick an icon to reveal its true position");
                        ui.label("• Export saves the map without the player");
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_map(ui);
        });

        if self.ui_state.needs_render {
            ctx.request_repaint();
        }
    }
}
